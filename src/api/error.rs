use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{0}")]
    NotFound(String),

    #[error("Upstream responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request to trend API failed")]
    Request(#[from] reqwest::Error),

    #[error("Malformed response from trend API")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid API configuration: {0}")]
    Config(String),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound(_))
    }
}

use thiserror::Error;

use crate::api::FetchError;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("{0}")]
    NotFound(String),

    #[error("Invalid date format '{0}'. Please use yyyymmdd format (e.g., 20250918)")]
    InvalidDateFormat(String),

    #[error("Failed to fetch news")]
    Transport(#[source] FetchError),
}

impl From<FetchError> for ResolveError {
    fn from(error: FetchError) -> Self {
        match error {
            FetchError::NotFound(message) => ResolveError::NotFound(message),
            other => ResolveError::Transport(other),
        }
    }
}

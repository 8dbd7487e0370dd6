use crate::api::error::FetchError;

pub const DEFAULT_API_URL: &str = "https://trend-story-api.oopus.info";
const ENV_API_URL: &str = "TREND_API_URL";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, FetchError> {
        dotenvy::dotenv().ok();

        match std::env::var(ENV_API_URL) {
            Ok(value) if !value.trim().is_empty() => Self::new(value),
            _ => Ok(Self::default()),
        }
    }

    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(FetchError::Config(format!(
                "{ENV_API_URL} must be an http(s) URL, got '{base_url}'"
            )));
        }
        Ok(Self { base_url })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

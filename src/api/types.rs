use serde::{Deserialize, Serialize};

use crate::article::ApiArticle;

pub const ARTICLE_NOT_FOUND: &str = "Article not found";
pub const NO_DATA_FOR_DATE: &str = "No data found for the requested date";

/// `GET /latest`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LatestResponse {
    #[serde(default)]
    pub records: Vec<ApiArticle>,
}

/// `GET /date/{yyyymmdd}`; a body without `records` is an empty day.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateResponse {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub records: Option<Vec<ApiArticle>>,
}

/// Failure shape used by both the upstream API and the local proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: u16,
    pub error: String,
}

impl ApiErrorBody {
    pub fn new(code: u16, error: impl Into<String>) -> Self {
        Self {
            code,
            error: error.into(),
        }
    }

    /// Parses a failure body, ignoring anything that does not carry both fields.
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    pub fn is_no_data_for_date(&self) -> bool {
        self.code == 404 && self.error == NO_DATA_FOR_DATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_body() {
        let body = br#"{"code":404,"error":"No data found for the requested date"}"#;
        let parsed = ApiErrorBody::parse(body).unwrap();
        assert!(parsed.is_no_data_for_date());
    }

    #[test]
    fn test_parse_ignores_success_payloads() {
        assert!(ApiErrorBody::parse(br#"{"date":"20250918","records":[]}"#).is_none());
        assert!(ApiErrorBody::parse(b"not json").is_none());
    }

    #[test]
    fn test_date_response_without_records() {
        let parsed: DateResponse = serde_json::from_str(r#"{"date":"20250918"}"#).unwrap();
        assert!(parsed.records.is_none());
    }
}

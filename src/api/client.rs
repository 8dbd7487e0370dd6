use async_trait::async_trait;
use bytes::Bytes;
use derive_more::Constructor;
use http::StatusCode;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use tracing::debug;

use crate::api::config::ApiConfig;
use crate::api::error::FetchError;
use crate::api::types::{ApiErrorBody, DateResponse, LatestResponse, ARTICLE_NOT_FOUND, NO_DATA_FOR_DATE};
use crate::article::{latest_batch, normalize, ApiArticle, Article};
use crate::resolve::date::DateParam;

/// Read-only access to the trend-story API.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn fetch_by_id(&self, id: i64) -> Result<Article, FetchError>;

    async fn fetch_by_date(&self, date: &DateParam) -> Result<Vec<Article>, FetchError>;

    /// Only the records sharing the newest `serpapi_data_date`.
    async fn fetch_latest(&self) -> Result<Vec<Article>, FetchError>;
}

/// Raw upstream reply, before any interpretation.
#[derive(Debug, Clone, Constructor)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl UpstreamResponse {
    /// The `error` field of a JSON failure body, if there is one.
    pub fn error_message(&self) -> Option<String> {
        serde_json::from_slice::<serde_json::Value>(&self.body)
            .ok()?
            .get("error")?
            .as_str()
            .map(str::to_owned)
    }

    fn into_success(self) -> Result<Self, FetchError> {
        if self.status.is_success() {
            return Ok(self);
        }

        Err(FetchError::Status {
            status: self.status.as_u16(),
            message: self
                .error_message()
                .unwrap_or_else(|| "An error occurred".to_string()),
        })
    }
}

#[derive(Clone)]
pub struct HttpArticleClient {
    config: ApiConfig,
    client: Client,
}

impl HttpArticleClient {
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Issue a GET against the upstream API and hand back status and body untouched.
    pub async fn forward(&self, path: &str) -> Result<UpstreamResponse, FetchError> {
        let url = self.config.endpoint(path);
        debug!("GET {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!("{url} -> {status} ({} bytes)", body.len());
        Ok(UpstreamResponse::new(status, body))
    }
}

#[async_trait]
impl ArticleSource for HttpArticleClient {
    async fn fetch_by_id(&self, id: i64) -> Result<Article, FetchError> {
        let response = self.forward(&format!("article/{id}")).await?;
        if response.status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(ARTICLE_NOT_FOUND.to_string()));
        }

        let response = response.into_success()?;
        let raw: ApiArticle = serde_json::from_slice(&response.body)?;
        Ok(normalize(&raw))
    }

    async fn fetch_by_date(&self, date: &DateParam) -> Result<Vec<Article>, FetchError> {
        let response = self.forward(&format!("date/{date}")).await?;

        if let Some(failure) = ApiErrorBody::parse(&response.body) {
            if failure.is_no_data_for_date() {
                return Err(FetchError::NotFound(failure.error));
            }
        }
        if response.status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(NO_DATA_FOR_DATE.to_string()));
        }

        let response = response.into_success()?;
        let parsed: DateResponse = serde_json::from_slice(&response.body)?;
        Ok(parsed
            .records
            .unwrap_or_default()
            .iter()
            .map(normalize)
            .collect())
    }

    async fn fetch_latest(&self) -> Result<Vec<Article>, FetchError> {
        let response = self.forward("latest").await?.into_success()?;
        let parsed: LatestResponse = serde_json::from_slice(&response.body)?;

        Ok(latest_batch(parsed.records).iter().map(normalize).collect())
    }
}

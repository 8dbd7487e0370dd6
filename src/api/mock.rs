use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::api::client::ArticleSource;
use crate::api::error::FetchError;
use crate::api::types::{ARTICLE_NOT_FOUND, NO_DATA_FOR_DATE};
use crate::article::{latest_batch, normalize, ApiArticle, Article};
use crate::resolve::date::DateParam;

#[derive(Debug, Default)]
struct FetchCounts {
    by_id: AtomicUsize,
    by_date: AtomicUsize,
    latest: AtomicUsize,
}

/// In-memory stand-in for the trend API that counts every fetch.
#[derive(Debug, Default)]
pub struct MockArticleSource {
    latest: Vec<ApiArticle>,
    dates: HashMap<String, Vec<ApiArticle>>,
    failing: bool,
    calls: FetchCounts,
}

impl MockArticleSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records served by `fetch_latest`, before the latest-date filter.
    pub fn with_latest(mut self, records: Vec<ApiArticle>) -> Self {
        self.latest = records;
        self
    }

    pub fn with_date(mut self, date: &str, records: Vec<ApiArticle>) -> Self {
        self.dates.insert(date.to_string(), records);
        self
    }

    /// Every fetch fails with a 500.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn by_id_calls(&self) -> usize {
        self.calls.by_id.load(Ordering::Relaxed)
    }

    pub fn by_date_calls(&self) -> usize {
        self.calls.by_date.load(Ordering::Relaxed)
    }

    pub fn latest_calls(&self) -> usize {
        self.calls.latest.load(Ordering::Relaxed)
    }

    pub fn total_calls(&self) -> usize {
        self.by_id_calls() + self.by_date_calls() + self.latest_calls()
    }

    fn check_failure(&self) -> Result<(), FetchError> {
        if self.failing {
            return Err(FetchError::Status {
                status: 500,
                message: "Internal server error".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleSource for MockArticleSource {
    async fn fetch_by_id(&self, id: i64) -> Result<Article, FetchError> {
        self.calls.by_id.fetch_add(1, Ordering::Relaxed);
        self.check_failure()?;

        self.latest
            .iter()
            .chain(self.dates.values().flatten())
            .find(|record| record.id == id)
            .map(normalize)
            .ok_or_else(|| FetchError::NotFound(ARTICLE_NOT_FOUND.to_string()))
    }

    async fn fetch_by_date(&self, date: &DateParam) -> Result<Vec<Article>, FetchError> {
        self.calls.by_date.fetch_add(1, Ordering::Relaxed);
        self.check_failure()?;

        self.dates
            .get(date.as_str())
            .map(|records| records.iter().map(normalize).collect())
            .ok_or_else(|| FetchError::NotFound(NO_DATA_FOR_DATE.to_string()))
    }

    async fn fetch_latest(&self) -> Result<Vec<Article>, FetchError> {
        self.calls.latest.fetch_add(1, Ordering::Relaxed);
        self.check_failure()?;

        Ok(latest_batch(self.latest.clone())
            .iter()
            .map(normalize)
            .collect())
    }
}

//! Turns a navigation target into a cache lookup or an upstream fetch.

pub mod date;
pub mod error;

use std::sync::Arc;

use tracing::debug;

use crate::api::ArticleSource;
use crate::article::Article;
use crate::cache::ArticleCache;

pub use date::DateParam;
pub use error::ResolveError;

/// `/article/{id}` segments that are not integers can never match a record.
pub fn parse_article_id(raw: &str) -> Result<i64, ResolveError> {
    raw.parse()
        .map_err(|_| ResolveError::NotFound(format!("No article with id '{raw}'")))
}

#[derive(Clone)]
pub struct RouteResolver {
    source: Arc<dyn ArticleSource>,
}

impl RouteResolver {
    pub fn new(source: Arc<dyn ArticleSource>) -> Self {
        Self { source }
    }

    /// Single article, from the cache when possible.
    ///
    /// With a date the whole day is fetched and searched, otherwise the
    /// article is fetched by id. Only successful lookups are cached.
    pub async fn resolve(
        &self,
        cache: &ArticleCache,
        article_id: i64,
        date: Option<&DateParam>,
    ) -> Result<Article, ResolveError> {
        if let Some(article) = cache.get(article_id, date).await {
            return Ok(article);
        }

        let article = match date {
            Some(day) => {
                debug!("resolving article {article_id} through date {day}");
                self.source
                    .fetch_by_date(day)
                    .await?
                    .into_iter()
                    .find(|article| article.id == article_id)
                    .ok_or_else(|| {
                        ResolveError::NotFound(format!(
                            "Article {article_id} not found for {day}"
                        ))
                    })?
            }
            None => {
                debug!("resolving article {article_id} by id");
                self.source.fetch_by_id(article_id).await?
            }
        };

        cache.put(article_id, date, &article).await;
        Ok(article)
    }

    /// Every article for a `yyyymmdd` day. Malformed input never reaches the network.
    pub async fn list_date(&self, raw_date: &str) -> Result<Vec<Article>, ResolveError> {
        let day = DateParam::parse(raw_date)?;
        Ok(self.source.fetch_by_date(&day).await?)
    }

    pub async fn latest(&self) -> Result<Vec<Article>, ResolveError> {
        Ok(self.source.fetch_latest().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockArticleSource;
    use crate::article::ApiArticle;
    use crate::store::MemoryStore;

    fn record(id: i64, title: &str) -> ApiArticle {
        ApiArticle {
            id,
            keywords: Some(title.to_string()),
            serpapi_data_date: Some("2025-09-18".to_string()),
            ..Default::default()
        }
    }

    fn setup(source: MockArticleSource) -> (Arc<MockArticleSource>, RouteResolver, ArticleCache) {
        let source = Arc::new(source);
        let resolver = RouteResolver::new(source.clone());
        let cache = ArticleCache::new(Arc::new(MemoryStore::new()));
        (source, resolver, cache)
    }

    #[tokio::test]
    async fn test_dated_lookup_scans_day_without_fetching_by_id() {
        let (source, resolver, cache) = setup(
            MockArticleSource::new()
                .with_date("20250918", vec![record(5, "five"), record(7, "seven")]),
        );
        let day = DateParam::parse("20250918").unwrap();

        let article = resolver.resolve(&cache, 7, Some(&day)).await.unwrap();
        assert_eq!(article.id, 7);
        assert_eq!(article.title, "seven");
        assert_eq!(source.by_id_calls(), 0);
        assert_eq!(source.by_date_calls(), 1);
        assert_eq!(cache.get(7, Some(&day)).await, Some(article));
    }

    #[tokio::test]
    async fn test_cache_hit_short_circuits_fetch() {
        let (source, resolver, cache) =
            setup(MockArticleSource::new().with_latest(vec![record(5, "five")]));

        let first = resolver.resolve(&cache, 5, None).await.unwrap();
        let second = resolver.resolve(&cache, 5, None).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(source.by_id_calls(), 1);
    }

    #[tokio::test]
    async fn test_cache_read_never_fetches() {
        let (source, _resolver, cache) = setup(MockArticleSource::new());

        assert_eq!(cache.get(5, None).await, None);
        assert_eq!(source.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_id_in_day_is_not_found_and_not_cached() {
        let (_source, resolver, cache) =
            setup(MockArticleSource::new().with_date("20250918", vec![record(5, "five")]));
        let day = DateParam::parse("20250918").unwrap();

        let err = resolver.resolve(&cache, 9, Some(&day)).await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound(_)));
        assert_eq!(cache.get(9, Some(&day)).await, None);
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_cached() {
        let (_source, resolver, cache) = setup(MockArticleSource::new().failing());

        let err = resolver.resolve(&cache, 5, None).await.unwrap_err();
        assert!(matches!(err, ResolveError::Transport(_)));
        assert_eq!(cache.get(5, None).await, None);
    }

    #[tokio::test]
    async fn test_list_date_rejects_malformed_input_before_fetching() {
        let (source, resolver, _cache) = setup(MockArticleSource::new());

        for raw in ["2025-09-18", "209918", "abcd1234"] {
            let err = resolver.list_date(raw).await.unwrap_err();
            assert!(matches!(err, ResolveError::InvalidDateFormat(_)));
        }
        assert_eq!(source.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_list_date_unknown_day_is_not_found() {
        let (_source, resolver, _cache) = setup(MockArticleSource::new());

        let err = resolver.list_date("20250101").await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound(_)));
    }

    #[test]
    fn test_parse_article_id() {
        assert_eq!(parse_article_id("42").unwrap(), 42);
        assert!(matches!(parse_article_id("abc"), Err(ResolveError::NotFound(_))));
    }
}

use std::sync::Arc;

use tracing::{debug, warn};

use crate::article::Article;
use crate::resolve::date::DateParam;
use crate::store::KvStore;

const KEY_PREFIX: &str = "article:";

/// Key for an article, qualified by the date it was looked up under.
/// `(5, None)` and `(5, Some(20250918))` are separate entries.
pub fn cache_key(id: i64, date: Option<&DateParam>) -> String {
    match date {
        Some(date) => format!("{KEY_PREFIX}{id}:{date}"),
        None => format!("{KEY_PREFIX}{id}"),
    }
}

/// Normalized articles memoized in a session store.
///
/// Store failures degrade to a miss on read and are dropped on write.
#[derive(Clone)]
pub struct ArticleCache {
    store: Arc<dyn KvStore>,
}

impl ArticleCache {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, id: i64, date: Option<&DateParam>) -> Option<Article> {
        let key = cache_key(id, date);
        let raw = match self.store.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("cache miss {key}");
                return None;
            }
            Err(e) => {
                warn!("cache read {key} failed: {e}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(article) => {
                debug!("cache hit {key}");
                Some(article)
            }
            Err(e) => {
                warn!("discarding unreadable cache entry {key}: {e}");
                None
            }
        }
    }

    pub async fn put(&self, id: i64, date: Option<&DateParam>, article: &Article) {
        let key = cache_key(id, date);
        let value = match serde_json::to_string(article) {
            Ok(value) => value,
            Err(e) => {
                warn!("failed to serialize {key}: {e}");
                return;
            }
        };

        if let Err(e) = self.store.set(&key, &value).await {
            warn!("cache write {key} failed: {e}");
        }
    }
}

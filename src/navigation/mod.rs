//! Scroll offsets and the "navigated from site" flag, kept per session.
//!
//! A page reports its offset when the reader follows an internal link; the
//! offset is handed back exactly once, the next time that path is rendered.

use std::sync::Arc;

use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::store::{KvStore, StoreError};

const SCROLL_PREFIX: &str = "scroll_position_";
pub const NAVIGATED_FROM_SITE: &str = "navigated_from_site";

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Departure path must be site-relative, got '{0}'")]
    InvalidPath(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub fn scroll_key(path: &str) -> String {
    format!("{SCROLL_PREFIX}{path}")
}

/// Beacon body sent when leaving a page through an internal link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Constructor)]
#[serde(rename_all = "camelCase")]
pub struct Departure {
    pub path: String,
    pub offset_y: i64,
}

#[derive(Clone)]
pub struct Navigation {
    store: Arc<dyn KvStore>,
}

impl Navigation {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Remembers where the reader was on `departure.path` and marks the next
    /// page as reached from inside the site. Negative offsets clamp to zero.
    pub async fn record_departure(&self, departure: &Departure) -> Result<(), NavigationError> {
        if !departure.path.starts_with('/') {
            return Err(NavigationError::InvalidPath(departure.path.clone()));
        }
        let offset = departure.offset_y.max(0);
        debug!("departing {} at {offset}", departure.path);

        self.store
            .set(&scroll_key(&departure.path), &offset.to_string())
            .await?;
        self.store.set(NAVIGATED_FROM_SITE, "true").await?;
        Ok(())
    }

    /// Offset saved for `path`, removed as it is read.
    pub async fn consume_arrival(&self, path: &str) -> Option<i64> {
        let key = scroll_key(path);
        match self.store.take(&key).await {
            Ok(raw) => raw.and_then(|raw| raw.parse().ok()),
            Err(e) => {
                warn!("failed to read {key}: {e}");
                None
            }
        }
    }

    /// Whether the previous page was on this site. Clears the flag.
    pub async fn take_navigated_from_site(&self) -> bool {
        match self.store.take(NAVIGATED_FROM_SITE).await {
            Ok(flag) => flag.as_deref() == Some("true"),
            Err(e) => {
                warn!("failed to read {NAVIGATED_FROM_SITE}: {e}");
                false
            }
        }
    }
}

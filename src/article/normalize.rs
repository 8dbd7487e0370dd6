use tracing::debug;

use crate::article::types::{ApiArticle, Article, AUTHOR};

/// Map a raw API record onto the internal article shape.
///
/// Never fails: absent fields become empty strings.
pub fn normalize(raw: &ApiArticle) -> Article {
    Article {
        id: raw.id,
        title: raw.keywords.clone().unwrap_or_default(),
        body: raw.news.clone().unwrap_or_default(),
        image_url: raw
            .image
            .as_ref()
            .and_then(|image| image.url.clone())
            .unwrap_or_default(),
        category: raw
            .tag
            .as_ref()
            .and_then(|tags| tags.first().cloned())
            .unwrap_or_default(),
        author: AUTHOR.to_string(),
        published_at: raw.date.clone().unwrap_or_default(),
    }
}

/// Keep only the records from the most recent ingestion date.
///
/// Dates are zero-padded, so the plain string maximum is the newest one.
/// A record without `serpapi_data_date` compares as the empty string.
pub fn latest_batch(records: Vec<ApiArticle>) -> Vec<ApiArticle> {
    let Some(latest) = records
        .iter()
        .map(|record| record.serpapi_data_date.as_deref().unwrap_or_default())
        .max()
        .map(str::to_owned)
    else {
        return Vec::new();
    };

    let total = records.len();
    let kept: Vec<_> = records
        .into_iter()
        .filter(|record| record.serpapi_data_date.as_deref().unwrap_or_default() == latest)
        .collect();

    debug!("latest batch {latest:?}: kept {}/{total} records", kept.len());
    kept
}

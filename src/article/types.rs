use serde::{Deserialize, Serialize};

/// Attribution shown on every article; the upstream API carries no author.
pub const AUTHOR: &str = "Trending-stories Project";

/// One record as returned by the trend-story API.
///
/// Everything except `id` is optional on the wire, and `null` is treated the
/// same as an absent field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiArticle {
    pub id: i64,
    #[serde(default)]
    pub news: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub image: Option<ApiImage>,
    #[serde(default)]
    pub tag: Option<Vec<String>>,
    #[serde(default)]
    pub serpapi_data_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiImage {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Normalized article used by every view.
///
/// An empty `image_url` means no image is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub image_url: String,
    pub category: String,
    pub author: String,
    pub published_at: String,
}

impl Article {
    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }
}

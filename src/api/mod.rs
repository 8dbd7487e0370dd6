pub mod client;
pub mod config;
pub mod error;
pub mod mock;
pub mod types;

pub use client::{ArticleSource, HttpArticleClient, UpstreamResponse};
pub use config::ApiConfig;
pub use error::FetchError;

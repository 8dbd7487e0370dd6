pub mod api;
pub mod article;
pub mod cache;
pub mod error;
pub mod http;
pub mod markdown;
pub mod navigation;
pub mod resolve;
pub mod store;
pub mod view;

pub use error::RestError;

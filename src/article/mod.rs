pub mod normalize;
pub mod types;

pub use normalize::{latest_batch, normalize};
pub use types::{ApiArticle, ApiImage, Article, AUTHOR};

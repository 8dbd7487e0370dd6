// HTTP server module

pub mod pages;
pub mod proxy;
pub mod routes;
pub mod session;

pub use routes::{router, AppState};
pub use session::Session;

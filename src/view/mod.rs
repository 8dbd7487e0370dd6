//! Server-rendered HTML for the grid, detail, modal, and related views.

pub mod date;
pub mod detail;
pub mod escape;
pub mod grid;
pub mod home;
pub mod layout;
pub mod modal;
pub mod related;

pub use layout::{render_page, Page};

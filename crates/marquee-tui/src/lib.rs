//! Interactive movie discovery UI.
//!
//! State controllers (debounced search, paged result sets, filters) are plain
//! values driven by the [`app`] event loop; rendering lives in a private `ui`
//! module built on `ratatui`.

pub mod app;
pub mod command;
pub mod debounce;
pub mod filters;
pub mod lightbox;
pub mod listing;
pub mod results;
pub mod route;
mod ui;
pub mod views;

pub use app::{TuiOptions, run_app};

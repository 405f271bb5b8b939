//! Application configuration module.
//!
//! Manages the TOML config file holding the catalog credential and
//! UI timing settings.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, CatalogConfig, UiConfig};
pub use paths::resolve_config_path;

//! Command handlers.

pub mod config;
pub mod run;
pub mod split;
pub mod types;

use std::path::Path;

use blurb_core::{Config, ConfigError};

/// Load config from `path`, or from the default location when `None`.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

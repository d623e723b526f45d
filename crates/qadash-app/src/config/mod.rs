//! Configuration file parsing for qadash
//!
//! Supports:
//! - `.qadash/config.toml` in the working directory
//! - `<config dir>/qadash/config.toml` as the user-wide fallback

pub mod settings;
pub mod types;

pub use settings::{find_config_file, load_settings, load_settings_from, CONFIG_FILENAME, QADASH_DIR};
pub use types::*;

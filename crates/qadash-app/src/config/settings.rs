//! Settings loading
//!
//! Lookup order: an explicit `--config` path, `.qadash/config.toml` in the
//! working directory, then `<config dir>/qadash/config.toml`. A missing file
//! yields defaults; an unreadable or invalid file is logged and also yields
//! defaults.

use std::path::{Path, PathBuf};

use qadash_core::prelude::*;

use super::types::Settings;

pub const QADASH_DIR: &str = ".qadash";
pub const CONFIG_FILENAME: &str = "config.toml";

/// Locate the settings file for `working_dir`, if any exists.
pub fn find_config_file(working_dir: &Path) -> Option<PathBuf> {
    let local = working_dir.join(QADASH_DIR).join(CONFIG_FILENAME);
    if local.is_file() {
        return Some(local);
    }
    let user = dirs::config_dir()?.join("qadash").join(CONFIG_FILENAME);
    user.is_file().then_some(user)
}

/// Load settings, preferring `explicit` over the discovered file.
///
/// An explicit path that does not exist is an error; everything else falls
/// back to defaults.
pub fn load_settings(explicit: Option<&Path>, working_dir: &Path) -> Result<Settings> {
    match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(Error::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            Ok(load_settings_from(path))
        }
        None => match find_config_file(working_dir) {
            Some(path) => Ok(load_settings_from(&path)),
            None => {
                debug!("No config file found, using defaults");
                Ok(Settings::default())
            }
        },
    }
}

/// Parse one settings file, falling back to defaults on any problem.
pub fn load_settings_from(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            Settings::default()
        }
    }
}

// src/config/loader.rs

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{LauncherError, Result};
use crate::fs::{FileSystem, RealFileSystem};

/// Config file picked up from the working directory when nothing else is
/// named.
pub const DEFAULT_CONFIG_FILE: &str = "ipmon-launcher.toml";

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] for the
/// semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    load_from_fs(&RealFileSystem, path.as_ref())
}

pub fn load_from_fs(fs: &dyn FileSystem, path: &Path) -> Result<RawConfigFile> {
    let contents = fs.read_to_string(path)?;
    let config: RawConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a configuration file from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Load the effective configuration.
///
/// - An explicitly named file (CLI flag or `IPMON_LAUNCHER_CONFIG`) must
///   exist.
/// - Otherwise [`DEFAULT_CONFIG_FILE`] is used if present, and built-in
///   defaults if not.
pub fn load_effective(fs: &dyn FileSystem, explicit: Option<&Path>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => {
            if !fs.is_file(path) {
                return Err(LauncherError::ConfigError(format!(
                    "config file {:?} does not exist",
                    path
                )));
            }
            debug!(config = %path.display(), "loading explicit config file");
            ConfigFile::try_from(load_from_fs(fs, path)?)
        }
        None => {
            let path = default_config_path();
            if fs.is_file(&path) {
                debug!(config = %path.display(), "loading default config file");
                ConfigFile::try_from(load_from_fs(fs, &path)?)
            } else {
                debug!("no config file found; using built-in defaults");
                Ok(ConfigFile::default())
            }
        }
    }
}

/// Default config location, relative to the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}

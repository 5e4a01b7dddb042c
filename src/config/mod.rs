// src/config/mod.rs

//! Configuration loading and validation for the launcher.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate it (`validate.rs`).
//! - Merge flags, environment and file into a launch plan (`resolve.rs`).

pub mod loader;
pub mod model;
pub mod resolve;
pub mod validate;

pub use loader::{DEFAULT_CONFIG_FILE, load_and_validate, load_effective, load_from_path};
pub use model::{ConfigFile, LauncherSection, LocaleSetting, MessagesSection, PausePolicy, RawConfigFile};
pub use resolve::{EnvSnapshot, LaunchPlan, Overrides, explicit_config_path, resolve_plan};

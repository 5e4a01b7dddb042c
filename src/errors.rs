// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LauncherError {
    /// The configured interpreter does not exist on disk (or on `PATH`).
    #[error("interpreter not found: {}", path.display())]
    InterpreterNotFound { path: PathBuf },

    /// The child process terminated unsuccessfully.
    ///
    /// `code` is `None` when the child was killed by a signal.
    #[error("child process failed with exit code {}", display_code(*code))]
    ChildProcessFailed { code: Option<i32> },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("failed to spawn {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LauncherError {
    /// Process exit code the launcher reports for this error.
    ///
    /// Every failure maps to `1`; the child's own code is only logged.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

fn display_code(code: Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "<signal>".to_string(),
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, LauncherError>;

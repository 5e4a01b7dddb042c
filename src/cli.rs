// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Every flag is optional: run bare, the launcher starts `src/main.py` with
//! whatever interpreter the config file, environment or `PATH` provides.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::model::{LocaleSetting, PausePolicy};

/// Command-line arguments for `ipmon-launcher`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "ipmon-launcher",
    version,
    about = "Locate a Python interpreter and start the IP monitoring tool.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the launcher config file (TOML).
    ///
    /// Default: `IPMON_LAUNCHER_CONFIG`, else `ipmon-launcher.toml` in the
    /// current directory if it exists.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Interpreter to run: a file path, or a bare name looked up on `PATH`.
    #[arg(long, value_name = "PATH")]
    pub interpreter: Option<String>,

    /// Script passed to the interpreter as its only argument.
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Directory the interpreter is started in.
    #[arg(long, value_name = "DIR")]
    pub working_dir: Option<PathBuf>,

    /// Never wait for a key press before exiting.
    #[arg(long)]
    pub no_pause: bool,

    /// Language of console messages.
    #[arg(long, value_enum, value_name = "LOCALE")]
    pub locale: Option<LocaleArg>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `IPMON_LAUNCHER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the launch plan, but don't start anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// Pause override implied by the flags, if any.
    pub fn pause_override(&self) -> Option<PausePolicy> {
        self.no_pause.then_some(PausePolicy::Never)
    }

    pub fn locale_override(&self) -> Option<LocaleSetting> {
        self.locale.map(LocaleSetting::from)
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LocaleArg {
    Auto,
    En,
    Zh,
}

impl From<LocaleArg> for LocaleSetting {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::Auto => LocaleSetting::Auto,
            LocaleArg::En => LocaleSetting::En,
            LocaleArg::Zh => LocaleSetting::Zh,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

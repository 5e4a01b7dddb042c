// src/config/resolve.rs

//! Merge CLI flags, environment and config file into a [`LaunchPlan`].
//!
//! Precedence for every setting: CLI flag, then environment, then config
//! file, then built-in default.

use std::path::PathBuf;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::model::{ConfigFile, LocaleSetting, PausePolicy};
use crate::errors::{LauncherError, Result};
use crate::fs::FileSystem;
use crate::interpreter::{INTERPRETER_ENV_VAR, InterpreterSpec, join_lexically};
use crate::messages::{Locale, Messages};

pub const CONFIG_ENV_VAR: &str = "IPMON_LAUNCHER_CONFIG";
pub const PAUSE_ENV_VAR: &str = "IPMON_LAUNCHER_PAUSE";

/// The environment variables the launcher cares about, captured once so
/// resolution stays a pure function.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    pub interpreter: Option<String>,
    pub config: Option<PathBuf>,
    pub pause: Option<String>,
    pub lc_all: Option<String>,
    pub lang: Option<String>,
    /// Directory the launcher was started from; relative interpreter and
    /// working-directory paths are anchored here.
    pub cwd: Option<PathBuf>,
}

impl EnvSnapshot {
    pub fn from_process() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            interpreter: var(INTERPRETER_ENV_VAR),
            config: var(CONFIG_ENV_VAR).map(PathBuf::from),
            pause: var(PAUSE_ENV_VAR),
            lc_all: var("LC_ALL"),
            lang: var("LANG"),
            cwd: std::env::current_dir().ok(),
        }
    }
}

/// Overrides coming from the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub interpreter: Option<String>,
    pub script: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
    pub pause: Option<PausePolicy>,
    pub locale: Option<LocaleSetting>,
}

impl From<&CliArgs> for Overrides {
    fn from(args: &CliArgs) -> Self {
        Self {
            interpreter: args.interpreter.clone(),
            script: args.script.clone(),
            working_dir: args.working_dir.clone(),
            pause: args.pause_override(),
            locale: args.locale_override(),
        }
    }
}

/// Fully resolved launch parameters.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub interpreter: InterpreterSpec,
    pub script: PathBuf,
    pub working_dir: Option<PathBuf>,
    pub pause: PausePolicy,
    pub locale: Locale,
    pub messages: Messages,
}

/// Config file to load: CLI flag first, then `IPMON_LAUNCHER_CONFIG`.
pub fn explicit_config_path(args: &CliArgs, env: &EnvSnapshot) -> Option<PathBuf> {
    args.config.clone().or_else(|| env.config.clone())
}

pub fn resolve_plan(
    cfg: &ConfigFile,
    overrides: &Overrides,
    env: &EnvSnapshot,
    fs: &dyn FileSystem,
) -> Result<LaunchPlan> {
    let interpreter = match overrides
        .interpreter
        .as_deref()
        .or(env.interpreter.as_deref())
        .or(cfg.launcher.interpreter.as_deref())
    {
        Some(value) if !value.trim().is_empty() => InterpreterSpec::parse(value),
        Some(_) => {
            return Err(LauncherError::ConfigError(
                "interpreter override must not be empty".to_string(),
            ));
        }
        None => InterpreterSpec::platform_default(),
    };
    let interpreter = match &env.cwd {
        Some(cwd) => interpreter.anchored_at(cwd),
        None => interpreter,
    };

    let script = overrides
        .script
        .clone()
        .unwrap_or_else(|| cfg.launcher.script.clone());
    if script.as_os_str().is_empty() {
        return Err(LauncherError::ConfigError(
            "script path must not be empty".to_string(),
        ));
    }

    let working_dir = overrides
        .working_dir
        .clone()
        .or_else(|| cfg.launcher.working_dir.clone())
        .map(|dir| match &env.cwd {
            Some(cwd) if dir.is_relative() => join_lexically(cwd, &dir),
            _ => dir,
        });
    if let Some(dir) = &working_dir {
        if !fs.is_dir(dir) {
            return Err(LauncherError::ConfigError(format!(
                "working directory {:?} does not exist",
                dir
            )));
        }
    }

    let pause = match (overrides.pause, env.pause.as_deref()) {
        (Some(p), _) => p,
        (None, Some(raw)) => raw
            .parse::<PausePolicy>()
            .map_err(|e| LauncherError::ConfigError(format!("{PAUSE_ENV_VAR}: {e}")))?,
        (None, None) => cfg.launcher.pause,
    };

    let locale_setting = overrides.locale.unwrap_or(cfg.messages.locale);
    let locale = Locale::resolve(locale_setting, env.lc_all.as_deref(), env.lang.as_deref());
    let messages = Messages::for_locale(locale).with_overrides(&cfg.messages);

    let plan = LaunchPlan {
        interpreter,
        script,
        working_dir,
        pause,
        locale,
        messages,
    };
    debug!(?plan, "resolved launch plan");
    Ok(plan)
}

// src/config/model.rs

use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

/// Script launched when nothing else is configured.
pub const DEFAULT_SCRIPT: &str = "src/main.py";

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [launcher]
/// interpreter = "C:\\Python39\\python.exe"
/// script = "src/main.py"
/// pause = "auto"
///
/// [messages]
/// locale = "zh"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub launcher: LauncherSection,

    #[serde(default)]
    pub messages: MessagesSection,
}

/// Validated configuration. Only obtainable through
/// `ConfigFile::try_from(RawConfigFile)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub launcher: LauncherSection,
    pub messages: MessagesSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(launcher: LauncherSection, messages: MessagesSection) -> Self {
        Self { launcher, messages }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(LauncherSection::default(), MessagesSection::default())
    }
}

/// `[launcher]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LauncherSection {
    /// Interpreter path, or a bare program name searched on `PATH`.
    ///
    /// If `None`, the platform default search is used.
    #[serde(default)]
    pub interpreter: Option<String>,

    /// Script handed to the interpreter as its single argument.
    #[serde(default = "default_script")]
    pub script: PathBuf,

    /// Directory to start the interpreter in; inherits the launcher's cwd
    /// when unset.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    #[serde(default)]
    pub pause: PausePolicy,
}

fn default_script() -> PathBuf {
    PathBuf::from(DEFAULT_SCRIPT)
}

impl Default for LauncherSection {
    fn default() -> Self {
        Self {
            interpreter: None,
            script: default_script(),
            working_dir: None,
            pause: PausePolicy::default(),
        }
    }
}

/// `[messages]` section: locale choice plus optional per-message overrides.
///
/// `interpreter_not_found` may use `{path}` as a placeholder for the
/// configured interpreter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessagesSection {
    #[serde(default)]
    pub locale: LocaleSetting,

    #[serde(default)]
    pub banner: Option<String>,

    #[serde(default)]
    pub interpreter_not_found: Option<String>,

    #[serde(default)]
    pub child_failed: Option<String>,

    #[serde(default)]
    pub press_any_key: Option<String>,
}

/// When to wait for a key press before the launcher exits.
///
/// - `Auto`: only when stdin is an interactive terminal (default).
/// - `Always`: unconditionally.
/// - `Never`: return straight to the caller's shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PausePolicy {
    #[default]
    Auto,
    Always,
    Never,
}

impl PausePolicy {
    pub fn should_pause(self, interactive: bool) -> bool {
        match self {
            PausePolicy::Auto => interactive,
            PausePolicy::Always => true,
            PausePolicy::Never => false,
        }
    }
}

impl FromStr for PausePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(PausePolicy::Auto),
            "always" => Ok(PausePolicy::Always),
            "never" => Ok(PausePolicy::Never),
            other => Err(format!(
                "invalid pause policy: {other} (expected \"auto\", \"always\" or \"never\")"
            )),
        }
    }
}

/// Requested console language; `Auto` defers to `LC_ALL` / `LANG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleSetting {
    #[default]
    Auto,
    En,
    Zh,
}

// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{LauncherError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = LauncherError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.launcher, raw.messages))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_launcher(cfg)?;
    validate_messages(cfg)?;
    Ok(())
}

fn validate_launcher(cfg: &RawConfigFile) -> Result<()> {
    if let Some(interpreter) = &cfg.launcher.interpreter {
        if interpreter.trim().is_empty() {
            return Err(LauncherError::ConfigError(
                "[launcher].interpreter must not be empty (omit it to search PATH)".to_string(),
            ));
        }
    }

    if cfg.launcher.script.as_os_str().is_empty() {
        return Err(LauncherError::ConfigError(
            "[launcher].script must not be empty".to_string(),
        ));
    }

    if let Some(dir) = &cfg.launcher.working_dir {
        if dir.as_os_str().is_empty() {
            return Err(LauncherError::ConfigError(
                "[launcher].working_dir must not be empty (omit it to use the current directory)"
                    .to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_messages(cfg: &RawConfigFile) -> Result<()> {
    if let Some(template) = &cfg.messages.interpreter_not_found {
        if !template.contains("{path}") {
            return Err(LauncherError::ConfigError(format!(
                "[messages].interpreter_not_found must mention {{path}} (got {:?})",
                template
            )));
        }
    }
    Ok(())
}

// src/exec/process.rs

//! Interpreter process runner.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::{LauncherError, Result};

/// A single program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub working_dir: Option<PathBuf>,
}

impl Invocation {
    /// `program script`, the shape the launcher always uses.
    pub fn interpreter(program: PathBuf, script: impl Into<OsString>) -> Self {
        Self {
            program,
            args: vec![script.into()],
            working_dir: None,
        }
    }

    pub fn in_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.working_dir = dir;
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// How the child ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOutcome {
    Success,
    /// Non-zero exit; `None` if terminated by a signal.
    Failed(Option<i32>),
}

impl ChildOutcome {
    pub fn from_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => ChildOutcome::Success,
            other => ChildOutcome::Failed(other),
        }
    }
}

/// Spawn the invocation with inherited stdio and wait for it to exit.
///
/// A Ctrl-C while waiting is logged and otherwise ignored: the child shares
/// the console, receives the interrupt itself, and we keep waiting for it.
pub async fn run_child(invocation: Invocation) -> Result<ChildOutcome> {
    info!(program = %invocation.program.display(), cmd = %invocation, "starting interpreter process");

    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(dir) = &invocation.working_dir {
        cmd.current_dir(dir);
    }

    let mut child = cmd.spawn().map_err(|source| LauncherError::Spawn {
        program: invocation.program.clone(),
        source,
    })?;
    debug!(pid = ?child.id(), "interpreter process spawned");

    let status = loop {
        tokio::select! {
            status_res = child.wait() => {
                break status_res?;
            }
            interrupt = tokio::signal::ctrl_c() => {
                match interrupt {
                    Ok(()) => info!("interrupt received; waiting for interpreter to exit"),
                    Err(e) => {
                        warn!(error = %e, "failed to listen for Ctrl+C");
                        break child.wait().await?;
                    }
                }
            }
        }
    };

    let code = status.code();
    info!(
        exit_code = ?code,
        success = status.success(),
        "interpreter process exited"
    );

    Ok(ChildOutcome::from_code(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_from_exit_code() {
        assert_eq!(ChildOutcome::from_code(Some(0)), ChildOutcome::Success);
        assert_eq!(ChildOutcome::from_code(Some(2)), ChildOutcome::Failed(Some(2)));
        assert_eq!(ChildOutcome::from_code(None), ChildOutcome::Failed(None));
        assert_eq!(ChildOutcome::from_code(Some(-1)), ChildOutcome::Failed(Some(-1)));
    }

    #[test]
    fn invocation_carries_exactly_one_argument() {
        let inv = Invocation::interpreter(PathBuf::from("/usr/bin/python3"), "src/main.py");
        assert_eq!(inv.args, vec![OsString::from("src/main.py")]);
        assert_eq!(inv.to_string(), "/usr/bin/python3 src/main.py");
        assert!(inv.working_dir.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn real_child_exit_codes_are_reported() {
        let ok = Invocation {
            program: PathBuf::from("/bin/sh"),
            args: vec!["-c".into(), "exit 0".into()],
            working_dir: None,
        };
        assert_eq!(run_child(ok).await.unwrap(), ChildOutcome::Success);

        let failing = Invocation {
            program: PathBuf::from("/bin/sh"),
            args: vec!["-c".into(), "exit 3".into()],
            working_dir: None,
        };
        assert_eq!(run_child(failing).await.unwrap(), ChildOutcome::Failed(Some(3)));
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let inv = Invocation::interpreter(PathBuf::from("/definitely/not/here/python"), "x.py");
        let err = run_child(inv).await.unwrap_err();
        assert!(matches!(err, LauncherError::Spawn { .. }));
    }
}

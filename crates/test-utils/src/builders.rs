#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use ipmon_launcher::config::{ConfigFile, LaunchPlan, PausePolicy, RawConfigFile};
use ipmon_launcher::console::{Console, NoopPauser, SharedBuffer};
use ipmon_launcher::exec::ProcessBackend;
use ipmon_launcher::fs::mock::MockFileSystem;
use ipmon_launcher::interpreter::{InterpreterSpec, PathSearch};
use ipmon_launcher::launcher::Launcher;
use ipmon_launcher::messages::{Locale, Messages};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn interpreter(mut self, value: &str) -> Self {
        self.config.launcher.interpreter = Some(value.to_string());
        self
    }

    pub fn script(mut self, path: &str) -> Self {
        self.config.launcher.script = PathBuf::from(path);
        self
    }

    pub fn pause(mut self, policy: PausePolicy) -> Self {
        self.config.launcher.pause = policy;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A launch plan for `interpreter src/main.py` with English messages and
/// the given pause policy.
pub fn plan_for(interpreter: &str, pause: PausePolicy) -> LaunchPlan {
    LaunchPlan {
        interpreter: InterpreterSpec::parse(interpreter),
        script: PathBuf::from("src/main.py"),
        working_dir: None,
        pause,
        locale: Locale::En,
        messages: Messages::for_locale(Locale::En),
    }
}

/// Never finds anything on `PATH`.
#[derive(Debug, Default)]
pub struct EmptySearch;

impl PathSearch for EmptySearch {
    fn find(&self, _program: &str) -> Option<PathBuf> {
        None
    }
}

/// Captured console output and pause count of a launcher built by
/// [`launcher_with`].
pub struct Captured {
    pub stdout: SharedBuffer,
    pub stderr: SharedBuffer,
    pub pauser: NoopPauser,
}

/// Wire a launcher around a mock filesystem with captured console output.
pub fn launcher_with<B: ProcessBackend>(
    plan: LaunchPlan,
    backend: B,
    fs: MockFileSystem,
    interactive: bool,
) -> (Launcher<B>, Captured) {
    let captured = Captured {
        stdout: SharedBuffer::new(),
        stderr: SharedBuffer::new(),
        pauser: NoopPauser::new(interactive),
    };
    let console = Console::new(
        Box::new(captured.stdout.clone()),
        Box::new(captured.stderr.clone()),
    );
    let launcher = Launcher::new(
        plan,
        backend,
        Arc::new(fs),
        Box::new(EmptySearch),
        console,
        Box::new(captured.pauser.clone()),
    );
    (launcher, captured)
}

// src/launcher.rs

//! The launch sequence.
//!
//! 1. banner
//! 2. existence check on the interpreter (no spawn if absent)
//! 3. run `interpreter script`, blocking until it exits
//! 4. failure message on non-zero exit
//! 5. pause (per policy) and report the exit code

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::LaunchPlan;
use crate::console::{Console, Pauser};
use crate::errors::{LauncherError, Result};
use crate::exec::{ChildOutcome, Invocation, ProcessBackend};
use crate::fs::FileSystem;
use crate::interpreter::PathSearch;

/// Result of one launcher run.
#[derive(Debug)]
pub struct LaunchReport {
    pub outcome: Result<()>,
    pub paused: bool,
}

impl LaunchReport {
    /// `0` on success, `1` on any failure.
    pub fn exit_code(&self) -> i32 {
        match &self.outcome {
            Ok(()) => 0,
            Err(e) => e.exit_code(),
        }
    }
}

pub struct Launcher<B: ProcessBackend> {
    plan: LaunchPlan,
    backend: B,
    fs: Arc<dyn FileSystem>,
    search: Box<dyn PathSearch>,
    console: Console,
    pauser: Box<dyn Pauser>,
}

impl<B: ProcessBackend> std::fmt::Debug for Launcher<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Launcher")
            .field("plan", &self.plan)
            .finish_non_exhaustive()
    }
}

impl<B: ProcessBackend> Launcher<B> {
    pub fn new(
        plan: LaunchPlan,
        backend: B,
        fs: Arc<dyn FileSystem>,
        search: Box<dyn PathSearch>,
        console: Console,
        pauser: Box<dyn Pauser>,
    ) -> Self {
        Self {
            plan,
            backend,
            fs,
            search,
            console,
            pauser,
        }
    }

    /// Run the full sequence, including console messages and the final
    /// pause. Never fails; the outcome is carried in the report.
    pub async fn run(mut self) -> LaunchReport {
        let banner = self.plan.messages.banner.clone();
        self.console.say(&banner);

        let outcome = self.launch().await;
        if let Err(err) = &outcome {
            self.report_failure(err);
        }

        let paused = self.maybe_pause();
        LaunchReport { outcome, paused }
    }

    /// Steps 2-4 without console output: locate, spawn, wait, judge.
    async fn launch(&mut self) -> Result<()> {
        let interpreter = self
            .plan
            .interpreter
            .locate(self.fs.as_ref(), self.search.as_ref())?;
        info!(interpreter = %interpreter.display(), script = %self.plan.script.display(), "interpreter located");

        let invocation = Invocation::interpreter(interpreter, self.plan.script.clone())
            .in_dir(self.plan.working_dir.clone());

        match self.backend.run(invocation).await? {
            ChildOutcome::Success => {
                info!("interpreter finished successfully");
                Ok(())
            }
            ChildOutcome::Failed(code) => Err(LauncherError::ChildProcessFailed { code }),
        }
    }

    fn report_failure(&mut self, err: &LauncherError) {
        match err {
            LauncherError::InterpreterNotFound { path } => {
                debug!(interpreter = %path.display(), "interpreter not found");
                let line = self.plan.messages.interpreter_not_found(path);
                self.console.error(&line);
            }
            LauncherError::ChildProcessFailed { code } => {
                info!(exit_code = ?code, "interpreter exited with failure");
                let line = self.plan.messages.child_failed.clone();
                self.console.error(&line);
            }
            other => {
                debug!(error = %other, "launch failed");
                let line = self.plan.messages.child_failed.clone();
                self.console.error(&line);
                self.console.error(&other.to_string());
            }
        }
    }

    fn maybe_pause(&mut self) -> bool {
        if !self.plan.pause.should_pause(self.pauser.is_interactive()) {
            return false;
        }
        let prompt = self.plan.messages.press_any_key.clone();
        if let Err(e) = self.pauser.pause(&mut self.console, &prompt) {
            warn!(error = %e, "pause for key press failed");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::path::PathBuf;
    use std::pin::Pin;
    use std::sync::Mutex;

    use super::*;
    use crate::config::model::PausePolicy;
    use crate::console::{NoopPauser, SharedBuffer};
    use crate::fs::mock::MockFileSystem;
    use crate::interpreter::{DirListSearch, InterpreterSpec};
    use crate::messages::{Locale, Messages};

    struct ScriptedBackend {
        code: Option<i32>,
        calls: Arc<Mutex<Vec<Invocation>>>,
    }

    impl ProcessBackend for ScriptedBackend {
        fn run(
            &mut self,
            invocation: Invocation,
        ) -> Pin<Box<dyn Future<Output = Result<ChildOutcome>> + Send + '_>> {
            self.calls
                .lock()
                .unwrap()
                .push(invocation);
            let outcome = ChildOutcome::from_code(self.code);
            Box::pin(async move { Ok(outcome) })
        }
    }

    struct NoSearch;

    impl PathSearch for NoSearch {
        fn find(&self, _program: &str) -> Option<PathBuf> {
            None
        }
    }

    fn plan(interpreter: &str) -> LaunchPlan {
        LaunchPlan {
            interpreter: InterpreterSpec::parse(interpreter),
            script: PathBuf::from("src/main.py"),
            working_dir: None,
            pause: PausePolicy::Always,
            locale: Locale::En,
            messages: Messages::for_locale(Locale::En),
        }
    }

    struct Harness {
        out: SharedBuffer,
        err: SharedBuffer,
        calls: Arc<Mutex<Vec<Invocation>>>,
        pauser: NoopPauser,
    }

    async fn run_with(plan: LaunchPlan, fs: MockFileSystem, code: Option<i32>) -> (LaunchReport, Harness) {
        let harness = Harness {
            out: SharedBuffer::new(),
            err: SharedBuffer::new(),
            calls: Arc::default(),
            pauser: NoopPauser::new(false),
        };
        let backend = ScriptedBackend {
            code,
            calls: Arc::clone(&harness.calls),
        };
        let console = Console::new(Box::new(harness.out.clone()), Box::new(harness.err.clone()));
        let launcher = Launcher::new(
            plan,
            backend,
            Arc::new(fs),
            Box::new(NoSearch),
            console,
            Box::new(harness.pauser.clone()),
        );
        (launcher.run().await, harness)
    }

    #[tokio::test]
    async fn success_prints_banner_only() {
        let fs = MockFileSystem::new();
        fs.add_file("/py/python", b"");
        let (report, h) = run_with(plan("/py/python"), fs, Some(0)).await;

        assert_eq!(report.exit_code(), 0);
        assert!(report.paused);
        assert_eq!(h.pauser.pauses(), 1);
        assert!(h.out.contents().starts_with("Starting IP monitoring tool..."));
        assert!(h.err.contents().is_empty());

        let calls = h.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, PathBuf::from("/py/python"));
        assert_eq!(calls[0].args, vec![std::ffi::OsString::from("src/main.py")]);
    }

    #[tokio::test]
    async fn missing_interpreter_never_spawns() {
        let fs = MockFileSystem::new();
        let (report, h) = run_with(plan("/py/python"), fs, Some(0)).await;

        assert_eq!(report.exit_code(), 1);
        assert!(matches!(report.outcome, Err(LauncherError::InterpreterNotFound { .. })));
        assert!(h.calls.lock().unwrap().is_empty());
        assert!(h.err.contents().contains("/py/python"));
        assert_eq!(h.pauser.pauses(), 1);
    }

    #[tokio::test]
    async fn child_failure_maps_to_exit_one() {
        let fs = MockFileSystem::new();
        fs.add_file("/py/python", b"");
        let (report, h) = run_with(plan("/py/python"), fs, Some(2)).await;

        assert_eq!(report.exit_code(), 1);
        assert!(matches!(
            report.outcome,
            Err(LauncherError::ChildProcessFailed { code: Some(2) })
        ));
        assert!(h.err.contents().contains("exited with an error"));
    }

    #[tokio::test]
    async fn never_policy_skips_pause() {
        let fs = MockFileSystem::new();
        fs.add_file("/py/python", b"");
        let mut p = plan("/py/python");
        p.pause = PausePolicy::Never;
        let (report, h) = run_with(p, fs, Some(0)).await;

        assert!(!report.paused);
        assert_eq!(h.pauser.pauses(), 0);
    }

    #[tokio::test]
    async fn search_uses_path_lookup_result() {
        let fs = MockFileSystem::new();
        fs.add_file("/home/me/bin/python3", b"");
        let calls: Arc<Mutex<Vec<Invocation>>> = Arc::default();
        let backend = ScriptedBackend {
            code: Some(0),
            calls: Arc::clone(&calls),
        };
        let fs = Arc::new(fs);
        let search = DirListSearchOwned(Arc::clone(&fs));
        let launcher = Launcher::new(
            plan("python3"),
            backend,
            fs,
            Box::new(search),
            Console::new(Box::new(std::io::sink()), Box::new(std::io::sink())),
            Box::new(NoopPauser::new(false)),
        );

        let report = launcher.run().await;
        assert_eq!(report.exit_code(), 0);
        assert_eq!(
            calls.lock().unwrap()[0].program,
            PathBuf::from("/home/me/bin/python3")
        );
    }

    struct DirListSearchOwned(Arc<MockFileSystem>);

    impl PathSearch for DirListSearchOwned {
        fn find(&self, program: &str) -> Option<PathBuf> {
            DirListSearch::new(self.0.as_ref(), ["/home/me/bin"]).find(program)
        }
    }
}

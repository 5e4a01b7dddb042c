use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use ipmon_launcher::errors::Result;
use ipmon_launcher::exec::{ChildOutcome, Invocation, ProcessBackend};

/// A fake process backend that:
/// - records every invocation it is asked to run
/// - immediately "exits" with a preconfigured code.
#[derive(Debug, Clone)]
pub struct FakeBackend {
    exit_code: Option<i32>,
    invocations: Arc<Mutex<Vec<Invocation>>>,
}

impl FakeBackend {
    /// `None` simulates a child killed by a signal.
    pub fn exiting_with(exit_code: Option<i32>) -> Self {
        Self {
            exit_code,
            invocations: Arc::default(),
        }
    }

    pub fn succeeding() -> Self {
        Self::exiting_with(Some(0))
    }

    /// Shared view of the recorded invocations; stays valid after the
    /// backend has been moved into a launcher.
    pub fn recorder(&self) -> Arc<Mutex<Vec<Invocation>>> {
        Arc::clone(&self.invocations)
    }
}

impl ProcessBackend for FakeBackend {
    fn run(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<ChildOutcome>> + Send + '_>> {
        let invocations = Arc::clone(&self.invocations);
        let outcome = ChildOutcome::from_code(self.exit_code);

        Box::pin(async move {
            invocations.lock().unwrap().push(invocation);
            Ok(outcome)
        })
    }
}

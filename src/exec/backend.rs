// src/exec/backend.rs

//! Pluggable process backend abstraction.
//!
//! The launcher talks to a `ProcessBackend` instead of spawning directly, so
//! tests can record invocations and script exit codes without starting real
//! processes.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

use super::process::{ChildOutcome, Invocation, run_child};

/// Trait abstracting how the interpreter process is run.
pub trait ProcessBackend: Send {
    /// Run `invocation` to completion and report how it ended.
    ///
    /// Implementations must not return before the child has exited.
    fn run(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<ChildOutcome>> + Send + '_>>;
}

/// Real backend used in production: spawns an OS process with inherited
/// stdio.
#[derive(Debug, Clone, Default)]
pub struct RealProcessBackend;

impl RealProcessBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessBackend for RealProcessBackend {
    fn run(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<ChildOutcome>> + Send + '_>> {
        Box::pin(run_child(invocation))
    }
}

// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`process`] spawns the interpreter with `tokio::process::Command`,
//!   inheriting the console, and waits for it.
//! - [`backend`] provides the `ProcessBackend` trait and the
//!   `RealProcessBackend` used in production, which tests replace with a
//!   fake implementation.

pub mod backend;
pub mod process;

pub use backend::{ProcessBackend, RealProcessBackend};
pub use process::{ChildOutcome, Invocation};

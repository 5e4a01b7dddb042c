// src/console.rs

//! User-facing console output and the pause-for-keypress step.
//!
//! Status lines go to stdout, error lines to stderr. Tracing output is a
//! separate concern (see [`crate::logging`]).

use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use tracing::warn;

type Sink = Box<dyn Write + Send>;

pub struct Console {
    out: Sink,
    err: Sink,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

impl Console {
    pub fn stdio() -> Self {
        Self::new(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn new(out: Sink, err: Sink) -> Self {
        Self { out, err }
    }

    /// Print a status line. Console write failures are logged, never fatal.
    pub fn say(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}").and_then(|_| self.out.flush()) {
            warn!(error = %e, "failed to write to stdout");
        }
    }

    /// Print an error line.
    pub fn error(&mut self, line: &str) {
        if let Err(e) = writeln!(self.err, "{line}").and_then(|_| self.err.flush()) {
            warn!(error = %e, "failed to write to stderr");
        }
    }
}

/// A cloneable in-memory sink, handy for capturing console output.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(|p| p.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Blocks until the user acknowledges.
pub trait Pauser: Send {
    /// Whether the user can actually press a key here.
    fn is_interactive(&self) -> bool;

    fn pause(&mut self, console: &mut Console, prompt: &str) -> Result<()>;
}

/// Waits for any key on the real terminal, using raw mode so no Enter is
/// needed.
#[derive(Debug, Clone, Default)]
pub struct KeyPressPauser;

impl Pauser for KeyPressPauser {
    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn pause(&mut self, console: &mut Console, prompt: &str) -> Result<()> {
        console.say(prompt);

        terminal::enable_raw_mode().context("enabling terminal raw mode")?;
        let waited = wait_for_key();
        let restored = terminal::disable_raw_mode().context("restoring terminal mode");
        keep_read_error(waited, restored)
    }
}

/// Combine the key read with the raw-mode restore. A read failure is the
/// error reported; a restore failure alongside it is only logged.
fn keep_read_error(waited: Result<()>, restored: Result<()>) -> Result<()> {
    match (waited, restored) {
        (Err(read), Err(restore)) => {
            warn!(error = %restore, "failed to restore terminal mode");
            Err(read)
        }
        (waited, restored) => waited.and(restored),
    }
}

fn wait_for_key() -> Result<()> {
    loop {
        match event::read().context("reading terminal event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(()),
            _ => continue,
        }
    }
}

/// Never blocks; counts how often a pause was requested.
#[derive(Debug, Clone, Default)]
pub struct NoopPauser {
    interactive: bool,
    count: Arc<Mutex<usize>>,
}

impl NoopPauser {
    /// `interactive` is what [`Pauser::is_interactive`] will report.
    pub fn new(interactive: bool) -> Self {
        Self {
            interactive,
            count: Arc::default(),
        }
    }

    pub fn pauses(&self) -> usize {
        *self.count.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl Pauser for NoopPauser {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn pause(&mut self, console: &mut Console, prompt: &str) -> Result<()> {
        console.say(prompt);
        *self.count.lock().unwrap_or_else(|p| p.into_inner()) += 1;
        Ok(())
    }
}

//! Output emitter.
//!
//! Each source writes its lines as one block so that the two concurrent
//! fetches never interleave mid-line. Diagnostics go to standard error only.

use std::io::{self, Write};
use std::sync::Mutex;

/// Destination for output blocks and diagnostics.
pub trait Emitter: Send + Sync {
    /// Writes a block of output lines to standard output.
    ///
    /// The block is written in a single call, terminated by a newline.
    /// Empty blocks are not written.
    fn emit_block(&self, block: &str);

    /// Writes a diagnostic line to standard error.
    fn report(&self, message: &str);
}

/// Emitter backed by the process's standard streams.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdStreams;

impl Emitter for StdStreams {
    fn emit_block(&self, block: &str) {
        if block.is_empty() {
            return;
        }
        let mut out = io::stdout().lock();
        // A closed stdout (e.g. `| head`) is not worth a panic.
        let _ = writeln!(out, "{}", block).and_then(|_| out.flush());
    }

    fn report(&self, message: &str) {
        let mut err = io::stderr().lock();
        let _ = writeln!(err, "{}", message);
    }
}

/// Emitter that records everything in memory.
///
/// ```
/// use secrets_to_env::emit::{CapturedStreams, Emitter};
///
/// let streams = CapturedStreams::new();
/// streams.emit_block("A=\"1\"\nB=\"2\"");
/// streams.report("something failed");
///
/// assert_eq!(streams.stdout_lines(), vec!["A=\"1\"", "B=\"2\""]);
/// assert_eq!(streams.stderr(), vec!["something failed"]);
/// ```
#[derive(Debug, Default)]
pub struct CapturedStreams {
    blocks: Mutex<Vec<String>>,
    diagnostics: Mutex<Vec<String>>,
}

impl CapturedStreams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks written to standard output, in write order.
    pub fn blocks(&self) -> Vec<String> {
        self.blocks.lock().map(|b| b.clone()).unwrap_or_default()
    }

    /// Every standard output line across all blocks.
    pub fn stdout_lines(&self) -> Vec<String> {
        self.blocks()
            .iter()
            .flat_map(|b| b.lines().map(str::to_string).collect::<Vec<_>>())
            .collect()
    }

    /// Diagnostics written to standard error.
    pub fn stderr(&self) -> Vec<String> {
        self.diagnostics.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

impl Emitter for CapturedStreams {
    fn emit_block(&self, block: &str) {
        if block.is_empty() {
            return;
        }
        if let Ok(mut blocks) = self.blocks.lock() {
            blocks.push(block.to_string());
        }
    }

    fn report(&self, message: &str) {
        if let Ok(mut diagnostics) = self.diagnostics.lock() {
            diagnostics.push(message.to_string());
        }
    }
}

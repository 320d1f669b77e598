//! Progress notifications emitted while budgets are scanned.
//!
//! Extraction and aggregation never print; they report to a
//! [`ProgressObserver`] chosen by the caller.

use std::io::Write;

use tracing::{debug, info};

use crate::model::Subaward;

/// Receives progress events during a review run. Every method defaults to a
/// no-op so observers only implement what they care about.
pub trait ProgressObserver {
    fn run_started(&mut self, _file_count: usize) {}

    fn file_started(&mut self, _file_name: &str) {}

    fn subaward_found(&mut self, _subaward: &Subaward) {}

    fn file_finished(&mut self, _file_name: &str, _found: usize) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressObserver for TracingProgress {
    fn run_started(&mut self, file_count: usize) {
        info!(file_count, "reviewing budgets");
    }

    fn file_started(&mut self, file_name: &str) {
        info!(file = file_name, "reading budget");
    }

    fn subaward_found(&mut self, subaward: &Subaward) {
        debug!(
            name = %subaward.name,
            amount = %subaward.amount,
            file = %subaward.file_name,
            "found subaward"
        );
    }

    fn file_finished(&mut self, file_name: &str, found: usize) {
        info!(file = file_name, found, "finished budget");
    }
}

/// Writes the familiar per-file listing to a console stream.
///
/// Write failures are logged and otherwise ignored: progress output must
/// not abort a review.
pub struct ConsoleProgress<W: Write> {
    out: W,
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: std::fmt::Arguments<'_>) {
        if let Err(error) = writeln!(self.out, "{line}") {
            debug!(%error, "failed to write progress line");
        }
    }
}

impl<W: Write> ProgressObserver for ConsoleProgress<W> {
    fn file_started(&mut self, file_name: &str) {
        self.emit(format_args!("\n{file_name}"));
        self.emit(format_args!("{}", "-".repeat(39)));
    }

    fn subaward_found(&mut self, subaward: &Subaward) {
        self.emit(format_args!("Subaward: {}", subaward.name));
    }
}

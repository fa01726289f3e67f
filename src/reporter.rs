//! Failure reporters
//!
//! The pipeline never formats messages or decides the exit status; it hands
//! each failure to a [`FailureReporter`]. [`ConsoleReporter`] is what the
//! `boot` binary uses. [`MemoryReporter`] keeps failures for inspection.

use crate::pipeline::PipelineFailure;
use std::error::Error as _;
use std::io::{self, Write};
use std::sync::Mutex;

/// Status the console reporter exits with
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Receives the failure that stopped a pipeline run
pub trait FailureReporter {
    fn report_failure(&self, failure: PipelineFailure);
}

/// Function used to terminate the process
pub type ExitFn = Box<dyn Fn(i32) + Send + Sync>;

fn terminate(code: i32) {
    std::process::exit(code)
}

/// Writes `<stage>: <message>` and the cause chain, then exits
pub struct ConsoleReporter<W: Write> {
    out: Mutex<W>,
    show_trace: bool,
    exit: ExitFn,
}

impl ConsoleReporter<io::Stderr> {
    /// Reporter writing to stderr and exiting the process
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            show_trace: true,
            exit: Box::new(terminate),
        }
    }

    /// Whether to print the cause chain after the headline
    pub fn with_trace(mut self, show_trace: bool) -> Self {
        self.show_trace = show_trace;
        self
    }

    /// Replace process termination, e.g. to observe the exit code in tests
    pub fn with_exit<F>(mut self, exit: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.exit = Box::new(exit);
        self
    }

    /// Give back the writer
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_report(&self, out: &mut W, failure: &PipelineFailure) -> io::Result<()> {
        writeln!(out, "{}: {}", failure.label(), failure.error)?;
        if self.show_trace {
            let mut source = failure.error.source();
            while let Some(cause) = source {
                writeln!(out, "  caused by: {}", cause)?;
                source = cause.source();
            }
        }
        out.flush()
    }
}

impl<W: Write> FailureReporter for ConsoleReporter<W> {
    fn report_failure(&self, failure: PipelineFailure) {
        {
            let mut out = match self.out.lock() {
                Ok(out) => out,
                Err(poisoned) => poisoned.into_inner(),
            };
            // Nowhere left to report a broken error channel
            let _ = self.write_report(&mut out, &failure);
        }
        (self.exit)(FAILURE_EXIT_CODE);
    }
}

/// Keeps reported failures in memory
#[derive(Debug, Default)]
pub struct MemoryReporter {
    failures: Mutex<Vec<PipelineFailure>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything reported so far
    pub fn take(&self) -> Vec<PipelineFailure> {
        match self.failures.lock() {
            Ok(mut failures) => std::mem::take(&mut *failures),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.failures.lock().map(|f| f.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FailureReporter for MemoryReporter {
    fn report_failure(&self, failure: PipelineFailure) {
        match self.failures.lock() {
            Ok(mut failures) => failures.push(failure),
            Err(poisoned) => poisoned.into_inner().push(failure),
        }
    }
}

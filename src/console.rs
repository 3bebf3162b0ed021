//! Console echo.
//!
//! Every logging call reaches the console regardless of threshold, and sink failures are
//! reported here too, so nothing in this module may fail or panic on I/O.

use crate::formatter::priority_tag;
use crate::severity::Severity;
use std::fmt::Debug;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// The last-resort output of the logging path.
pub trait Console: Debug + Send + Sync {
    /// Writes one leveled message, tagged compactly when `compact` is set.
    /// Must never fail observably.
    fn echo(&self, severity: Severity, message: &str, compact: bool);

    fn emit(&self, severity: Severity, message: &str) {
        self.echo(severity, message, false)
    }

    /// The process may imminently exit. Push out anything buffered.
    fn flush(&self) {}
}

/// Which standard stream a severity is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    /// `Error` and above go to stderr. Monotonic in severity.
    pub fn for_severity(severity: Severity) -> Self {
        if severity.meets(Severity::Error) {
            Stream::Stderr
        } else {
            Stream::Stdout
        }
    }
}

/// Formats a console echo line, e.g. `[DEBUG] x`, or `[WARN]  x` when compact.
pub fn console_line(severity: Severity, message: &str, compact: bool) -> String {
    format!("{} {}", priority_tag(severity, compact), message)
}

/// Writes to stdout/stderr, discarding write errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StdConsole;

impl StdConsole {
    pub const fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn echo(&self, severity: Severity, message: &str, compact: bool) {
        let line = console_line(severity, message, compact);
        let _ = match Stream::for_severity(severity) {
            Stream::Stdout => writeln!(std::io::stdout().lock(), "{line}"),
            Stream::Stderr => writeln!(std::io::stderr().lock(), "{line}"),
        };
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
    }
}

/// One captured console echo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub severity: Severity,
    pub stream: Stream,
    pub message: String,
    pub compact: bool,
}

impl ConsoleLine {
    pub fn rendered(&self) -> String {
        console_line(self.severity, &self.message, self.compact)
    }
}

/// Captures console echoes in memory. Clones share one buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryConsole {
    lines: Arc<Mutex<Vec<ConsoleLine>>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything captured so far.
    pub fn lines(&self) -> Vec<ConsoleLine> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Removes and returns everything captured so far.
    pub fn drain(&self) -> Vec<ConsoleLine> {
        match self.lines.lock() {
            Ok(mut lines) => std::mem::take(&mut *lines),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    /// Rendered lines, e.g. `[DEBUG] x`.
    pub fn rendered(&self) -> Vec<String> {
        self.lines().iter().map(ConsoleLine::rendered).collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.rendered().contains(needle))
    }

    pub fn len(&self) -> usize {
        self.lines().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Console for MemoryConsole {
    fn echo(&self, severity: Severity, message: &str, compact: bool) {
        let line = ConsoleLine {
            severity,
            stream: Stream::for_severity(severity),
            message: message.to_string(),
            compact,
        };
        match self.lines.lock() {
            Ok(mut lines) => lines.push(line),
            Err(poisoned) => poisoned.into_inner().push(line),
        }
    }
}

/// Forwards console echoes to `tracing` under the `relaylog::console` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConsole;

impl Console for TracingConsole {
    fn echo(&self, severity: Severity, message: &str, compact: bool) {
        let label = if compact {
            severity.compact_label()
        } else {
            severity.label()
        };
        match severity {
            Severity::Debug => {
                tracing::debug!(target: "relaylog::console", severity = label, "{message}")
            }
            Severity::Info => {
                tracing::info!(target: "relaylog::console", severity = label, "{message}")
            }
            Severity::Warning => {
                tracing::warn!(target: "relaylog::console", severity = label, "{message}")
            }
            Severity::Error | Severity::Critical | Severity::Terminal => {
                tracing::error!(target: "relaylog::console", severity = label, "{message}")
            }
        }
    }
}

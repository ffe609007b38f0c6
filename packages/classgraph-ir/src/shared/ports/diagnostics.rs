//! Diagnostic sink
//!
//! Append-only channel for inconsistencies found while rebuilding structure.
//! Writers never block on readers and never fail; ordering between units
//! processed concurrently is unspecified.

use parking_lot::Mutex;
use serde::Serialize;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

/// One recorded message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Logging capability injected into every component
pub trait DiagnosticSink: Send + Sync {
    fn write_message(&self, message: &str, severity: Severity);

    fn warn(&self, message: &str) {
        self.write_message(message, Severity::Warn);
    }

    fn error(&self, message: &str) {
        self.write_message(message, Severity::Error);
    }
}

/// Forwards diagnostics to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn write_message(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => tracing::info!(target: "classgraph", "{}", message),
            Severity::Warn => tracing::warn!(target: "classgraph", "{}", message),
            Severity::Error => tracing::error!(target: "classgraph", "{}", message),
        }
    }
}

/// Records diagnostics in memory (tests, CLI summaries)
///
/// Also forwards to `tracing` so collected runs still show up in logs.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// True if any recorded message of `severity` contains `needle`
    pub fn contains(&self, severity: Severity, needle: &str) -> bool {
        self.entries
            .lock()
            .iter()
            .any(|d| d.severity == severity && d.message.contains(needle))
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl DiagnosticSink for CollectingSink {
    fn write_message(&self, message: &str, severity: Severity) {
        TracingSink.write_message(message, severity);
        self.entries.lock().push(Diagnostic {
            severity,
            message: message.to_string(),
        });
    }
}

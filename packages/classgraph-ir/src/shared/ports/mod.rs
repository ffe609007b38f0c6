//! Ports shared by every feature

pub mod diagnostics;

pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, Severity, TracingSink};

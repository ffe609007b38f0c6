//! Error types for the classgraph-ir crate
//!
//! Every fatal condition aborts exactly one unit (one input class) and is
//! handed back to the batch driver as a value. Non-fatal inconsistencies never
//! surface here; they go to the diagnostic sink instead.
//!
//! Features:
//! - Categorized error kinds matching the reconstruction stages
//! - Optional unit (class name) context
//! - Source error chaining

use std::fmt;

use crate::config::ConfigError;
use crate::shared::utils::intern::InternedString;

/// Error kind categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Nested-type or exception tuples that cannot be decoded into records
    MalformedAttribute,
    /// The loading collaborator reported a missing or corrupted class stream
    CorruptedClass,
    /// Call-site descriptor with an unusable invocation kind
    InvalidCallSite,
    /// Configuration errors
    Config,
    /// IO errors
    Io,
    /// JSON / YAML (de)serialization errors
    Serialization,
    /// Internal errors (bugs)
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedAttribute => "malformed_attribute",
            ErrorKind::CorruptedClass => "corrupted_class",
            ErrorKind::InvalidCallSite => "invalid_call_site",
            ErrorKind::Config => "config",
            ErrorKind::Io => "io",
            ErrorKind::Serialization => "serialization",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Unified error type
#[derive(Debug)]
pub struct ClassgraphError {
    pub kind: ErrorKind,
    pub message: String,
    /// Internal name of the class whose build was aborted
    pub unit: Option<String>,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ClassgraphError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            unit: None,
            source: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedAttribute, message)
    }

    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CorruptedClass, message)
    }

    pub fn invalid_call_site(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCallSite, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// True for errors that abort a single unit and leave the batch running
    pub fn is_unit_fatal(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::MalformedAttribute | ErrorKind::CorruptedClass | ErrorKind::InvalidCallSite
        )
    }
}

impl fmt::Display for ClassgraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)?;
        if let Some(ref unit) = self.unit {
            write!(f, " in {}", unit)?;
        }
        Ok(())
    }
}

impl std::error::Error for ClassgraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ClassgraphError>;

/// A unit that was skipped, with the error that aborted it
#[derive(Debug)]
pub struct UnitFailure {
    pub unit: InternedString,
    pub error: ClassgraphError,
}

impl UnitFailure {
    pub fn new(unit: InternedString, error: ClassgraphError) -> Self {
        Self { unit, error }
    }
}

impl fmt::Display for UnitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.unit, self.error)
    }
}

impl From<std::io::Error> for ClassgraphError {
    fn from(err: std::io::Error) -> Self {
        ClassgraphError::new(ErrorKind::Io, format!("IO error: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for ClassgraphError {
    fn from(err: serde_json::Error) -> Self {
        ClassgraphError::new(ErrorKind::Serialization, format!("JSON error: {}", err))
            .with_source(err)
    }
}

impl From<ConfigError> for ClassgraphError {
    fn from(err: ConfigError) -> Self {
        ClassgraphError::new(ErrorKind::Config, err.to_string()).with_source(err)
    }
}

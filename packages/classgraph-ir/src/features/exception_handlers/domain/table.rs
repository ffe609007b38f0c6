use serde::Serialize;

use crate::features::exception_handlers::ports::SubtypeOracle;
use crate::shared::models::{ClassgraphError, ConstantPool, RawExceptionEntry, Result};
use crate::shared::utils::intern::InternedString;

/// One protected range of a method body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExceptionHandler {
    /// Inclusive
    pub start_line: u32,
    /// Exclusive
    pub end_line: u32,
    pub handler_line: u32,
    /// `None` for catch-all (finally / synchronized) handlers
    pub exception_type: Option<InternedString>,
}

impl ExceptionHandler {
    pub fn covers(&self, line: u32) -> bool {
        self.start_line <= line && line < self.end_line
    }

    pub fn is_catch_all(&self) -> bool {
        self.exception_type.is_none()
    }
}

/// Handlers of one method in binary declaration order
///
/// The order is significant: the JVM picks the first matching entry, so the
/// table is never sorted or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExceptionTable {
    handlers: Vec<ExceptionHandler>,
}

impl ExceptionTable {
    pub fn new(handlers: Vec<ExceptionHandler>) -> Self {
        Self { handlers }
    }

    /// Resolve raw code-attribute entries against the method's class pool
    pub fn decode(entries: &[RawExceptionEntry], pool: &ConstantPool) -> Result<Self> {
        let mut handlers = Vec::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if entry.start_pc > entry.end_pc {
                return Err(ClassgraphError::malformed(format!(
                    "exception entry {}: start {} after end {}",
                    position, entry.start_pc, entry.end_pc
                )));
            }
            let exception_type = match entry.catch_type_index {
                0 => None,
                index => Some(pool.class_name(index).cloned().map_err(|e| {
                    ClassgraphError::malformed(format!(
                        "exception entry {}: {}",
                        position, e.message
                    ))
                })?),
            };
            handlers.push(ExceptionHandler {
                start_line: entry.start_pc,
                end_line: entry.end_pc,
                handler_line: entry.handler_pc,
                exception_type,
            });
        }
        Ok(Self { handlers })
    }

    /// First handler covering `line` that accepts `thrown`
    ///
    /// A catch-all handler matches only when `include_any` is set; a typed
    /// handler matches when `thrown` is a subtype of its type.
    pub fn lookup(
        &self,
        oracle: &dyn SubtypeOracle,
        line: u32,
        thrown: Option<&str>,
        include_any: bool,
    ) -> Option<&ExceptionHandler> {
        self.handlers.iter().find(|handler| {
            if !handler.covers(line) {
                return false;
            }
            match (&handler.exception_type, thrown) {
                (None, _) => include_any,
                (Some(caught), Some(thrown)) => oracle.is_subtype(thrown, caught),
                (Some(_), None) => false,
            }
        })
    }

    pub fn handlers(&self) -> &[ExceptionHandler] {
        &self.handlers
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

//! Shared module - Common types and utilities
//!
//! Input descriptors, the error type, and the ports (diagnostics) every
//! feature depends on.

pub mod models;
pub mod ports;
pub mod utils;

// Re-exports for convenience
pub use models::*;
pub use utils::intern::{intern, InternedString};

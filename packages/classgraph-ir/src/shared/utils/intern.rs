//! Shared string type for class, method and type names

use std::sync::Arc;

/// Interned string for names shared across records, nodes and indexes
pub type InternedString = Arc<str>;

/// Helper to create interned strings
#[inline]
pub fn intern(s: impl AsRef<str>) -> InternedString {
    Arc::from(s.as_ref())
}

// Exception Handlers - per-method handler tables
//
// Raw code-attribute entries → declaration-ordered ExceptionTables with a
// subtype-aware first-match lookup.

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{ExceptionHandler, ExceptionTable, MethodExceptionIndex};
pub use infrastructure::{ClassHierarchyOracle, JAVA_LANG_OBJECT};
pub use ports::SubtypeOracle;

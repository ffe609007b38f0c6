// Renaming - pluggable identifier policy for nested simple names
//
// The policy itself is an external capability; this feature owns the port,
// the batch-wide result cache that guarantees one policy query per key, and
// a convention-based default policy.

pub mod infrastructure;
pub mod ports;

pub use infrastructure::{ConventionRenamer, NoRenaming, RenameCache, RenameCacheStats};
pub use ports::{ElementKind, RenamingPolicy};

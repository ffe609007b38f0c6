// Class Tree - nested-class forest reconstruction
//
// Normalized nesting records → one tree per top-level class, stored in a
// single arena. LAMBDA nodes are added afterwards by the lambda feature.

pub mod domain;
pub mod infrastructure;

pub use domain::{Checkpoint, ClassForest, ClassKind, ClassNode, NodeId};
pub use infrastructure::{BuildMark, ClassTreeBuilder};

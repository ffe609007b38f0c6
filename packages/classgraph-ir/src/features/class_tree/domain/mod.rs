mod forest;
mod node;

pub use forest::{Checkpoint, ClassForest};
pub use node::{ClassKind, ClassNode, NodeId};

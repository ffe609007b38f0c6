mod index;
mod record;

pub use index::{MergeOutcome, NestedIndex};
pub use record::{NestedKind, NestedTypeRecord};

// Nested Records - InnerClasses attribute normalization
//
// Raw attribute tuples → named NestedTypeRecords plus two lookup indexes
// (enclosing → nested, nested → enclosing). Runs before the class-tree
// builder and is the only place where tuple decoding can fail.

pub mod domain;
pub mod infrastructure;

pub use domain::{MergeOutcome, NestedIndex, NestedKind, NestedTypeRecord};
pub use infrastructure::{DecodedUnit, NormalizeOutcome, RecordNormalizer};

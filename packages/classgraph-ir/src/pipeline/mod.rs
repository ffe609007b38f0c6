//! Pipeline orchestration

pub mod batch;
pub mod driver;

pub use batch::{BatchOutcome, ClassBatch, CorruptedUnit};
pub use driver::ClassTreeDriver;

mod builder;

pub use builder::{BuildMark, ClassTreeBuilder};

//! Utility modules shared across features

pub mod intern;

pub use intern::{intern, InternedString};

//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure business logic (no external dependencies)
//! - ports/      - Interface definitions (traits)
//! - infrastructure/ - Implementations over the loaded class set

pub mod class_tree;
pub mod exception_handlers;
pub mod lambda;
pub mod nested_records;
pub mod renaming;

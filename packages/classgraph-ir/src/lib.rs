/*
 * Classgraph IR - Structural core of a class-file decompiler
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Loaded-class descriptors, errors, diagnostic sink port
 * - features/    : Vertical slices (nested_records → class_tree → lambda,
 *                  exception_handlers, renaming)
 * - pipeline/    : Batch driver with per-unit failure isolation
 * - config/      : Presets, YAML configuration, validation
 *
 * Parallelism:
 * - Rayon work-stealing for per-class attribute decoding
 * - Deterministic merge in registration order
 */

// Crate-level lint configuration
#![allow(clippy::too_many_arguments)] // Pipeline phases thread several borrowed inputs
#![allow(clippy::type_complexity)] // Phase result tuples
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::module_inception)] // Module naming intentional

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Explicit per-batch context
pub mod session;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ConfigError, DecompileConfig, ParallelConfig, Preset};
pub use features::class_tree::{ClassForest, ClassKind, ClassNode, ClassTreeBuilder, NodeId};
pub use features::exception_handlers::{
    ClassHierarchyOracle, ExceptionHandler, ExceptionTable, MethodExceptionIndex, SubtypeOracle,
};
pub use features::lambda::{CallSiteDescriptor, InvocationKind, LambdaInfo, LambdaSynthesizer};
pub use features::nested_records::{NestedIndex, NestedKind, NestedTypeRecord, RecordNormalizer};
pub use features::renaming::{ConventionRenamer, NoRenaming, RenameCache, RenamingPolicy};
pub use pipeline::{BatchOutcome, ClassBatch, ClassTreeDriver, CorruptedUnit};
pub use session::DecompileSession;
pub use shared::models::{
    AccessFlags, ClassContext, ClassgraphError, ErrorKind, LoadedClass, Result, UnitFailure,
};
pub use shared::ports::{CollectingSink, Diagnostic, DiagnosticSink, Severity, TracingSink};

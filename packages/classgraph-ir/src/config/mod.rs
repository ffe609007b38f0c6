//! Configuration System
//!
//! Two levels, same as the rest of the pipeline:
//! - Level 1: Preset - one-liner (`DecompileConfig::preset(Preset::Structure)`)
//! - Level 2: Override - builder methods or a versioned YAML file
//!
//! # Examples
//!
//! ```rust,ignore
//! use classgraph_ir::config::{DecompileConfig, Preset};
//!
//! let config = DecompileConfig::preset(Preset::Renaming)
//!     .parallel(|p| p.num_threads(4));
//! config.validate()?;
//!
//! let config = DecompileConfig::from_yaml("decompile.yaml")?;
//! ```

pub mod decompile_config;
pub mod error;
pub mod preset;

// Re-exports
pub use decompile_config::{DecompileConfig, ParallelConfig};
pub use error::{ConfigError, ConfigResult};
pub use preset::Preset;

//! Batch configuration
//!
//! Options that used to be process-wide preferences now live in one value
//! owned by the session for the duration of a batch.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;

const MAX_THREADS: usize = 1024;

/// Parallel execution settings for the batch driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParallelConfig {
    /// Decode attributes and build exception indexes on the rayon pool
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Dedicated pool size; `None` uses the global rayon pool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_threads: Option<usize>,
}

fn default_true() -> bool {
    true
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            num_threads: None,
        }
    }
}

impl ParallelConfig {
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn num_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Threads the driver will actually use
    pub fn effective_threads(&self) -> usize {
        if !self.enabled {
            return 1;
        }
        self.num_threads.unwrap_or_else(num_cpus::get).max(1)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(threads) = self.num_threads {
            if threads == 0 || threads > MAX_THREADS {
                return Err(ConfigError::range_with_hint(
                    "parallel.num_threads",
                    threads,
                    1,
                    MAX_THREADS,
                    "Omit the field to use the global rayon pool",
                ));
            }
        }
        Ok(())
    }
}

/// Decompilation options for one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompileConfig {
    pub preset: Preset,
    /// Rebuild the nested-class forest from InnerClasses attributes
    pub decompile_inner: bool,
    /// Route nested simple names through the renaming policy
    pub rename_entities: bool,
    pub parallel: ParallelConfig,
}

impl Default for DecompileConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

impl DecompileConfig {
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            decompile_inner: preset.decompile_inner(),
            rename_entities: preset.rename_entities(),
            parallel: ParallelConfig::default(),
        }
    }

    pub fn decompile_inner(mut self, enabled: bool) -> Self {
        self.decompile_inner = enabled;
        self
    }

    pub fn rename_entities(mut self, enabled: bool) -> Self {
        self.rename_entities = enabled;
        self
    }

    /// Adjust parallel settings through a closure
    pub fn parallel<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(ParallelConfig) -> ParallelConfig,
    {
        self.parallel = configure(self.parallel);
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.parallel.validate()
    }

    /// Load and validate a YAML v1 configuration file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a YAML v1 document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        match export.version {
            None => return Err(ConfigError::MissingVersion),
            Some(1) => {}
            Some(found) => {
                return Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: vec![1],
                })
            }
        }

        let preset = match export.preset {
            Some(name) => Preset::from_str(&name)?,
            None => Preset::default(),
        };

        let mut config = Self::preset(preset);
        if let Some(overrides) = export.overrides {
            if let Some(inner) = overrides.decompile_inner {
                config.decompile_inner = inner;
            }
            if let Some(rename) = overrides.rename_entities {
                config.rename_entities = rename;
            }
            if let Some(parallel) = overrides.parallel {
                config.parallel = parallel;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            preset: Some(self.preset.as_str().to_string()),
            overrides: Some(ConfigOverrides {
                decompile_inner: Some(self.decompile_inner),
                rename_entities: Some(self.rename_entities),
                parallel: Some(self.parallel.clone()),
            }),
        };
        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }
}

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigExportV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    preset: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    overrides: Option<ConfigOverrides>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    decompile_inner: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    rename_entities: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    parallel: Option<ParallelConfig>,
}

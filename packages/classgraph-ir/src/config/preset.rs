//! Preset configurations
//!
//! Presets provide complete default configurations for common use cases.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Rebuild the nested-class forest, keep original names
    Structure,

    /// Rebuild the forest and route simple names through the renaming policy
    Renaming,

    /// Treat every own class as a top-level root (no nested-class processing)
    Flat,
}

impl Preset {
    /// Parse preset from string
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "structure" => Ok(Self::Structure),
            "renaming" => Ok(Self::Renaming),
            "flat" => Ok(Self::Flat),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Renaming => "renaming",
            Self::Flat => "flat",
        }
    }

    pub(crate) fn decompile_inner(&self) -> bool {
        !matches!(self, Self::Flat)
    }

    pub(crate) fn rename_entities(&self) -> bool {
        matches!(self, Self::Renaming)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Structure
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Batch input and output types

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::features::class_tree::ClassForest;
use crate::features::exception_handlers::MethodExceptionIndex;
use crate::features::lambda::CallSiteDescriptor;
use crate::shared::models::{ClassContext, LoadedClass, Result, UnitFailure};
use crate::shared::utils::intern::InternedString;

/// A class stream the loader could not decode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorruptedUnit {
    pub name: InternedString,
    pub reason: String,
}

/// Serialized input of one run
///
/// Loaded classes are registered first, in file order, then the corrupted
/// units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassBatch {
    #[serde(default)]
    pub classes: Vec<LoadedClass>,
    #[serde(default)]
    pub corrupted: Vec<CorruptedUnit>,
    #[serde(default)]
    pub call_sites: Vec<CallSiteDescriptor>,
}

impl ClassBatch {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Register every unit into a fresh context
    pub fn context(&self) -> ClassContext {
        let mut context = ClassContext::from_classes(self.classes.iter().cloned());
        for unit in &self.corrupted {
            context.add_corrupted(&unit.name, unit.reason.clone());
        }
        context
    }
}

/// Everything one driver run produces
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub forest: ClassForest,
    /// Per-class exception indexes, registration order
    pub exception_indexes: Vec<MethodExceptionIndex>,
    /// Units skipped because of a fatal error
    pub failures: Vec<UnitFailure>,
}

impl BatchOutcome {
    pub fn exception_index(&self, class_name: &str) -> Option<&MethodExceptionIndex> {
        self.exception_indexes
            .iter()
            .find(|index| index.class_name() == Some(class_name))
    }

    pub fn failed(&self, unit: &str) -> bool {
        self.failures.iter().any(|failure| &*failure.unit == unit)
    }
}

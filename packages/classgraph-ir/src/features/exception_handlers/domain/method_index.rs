use ahash::AHashMap;
use serde::Serialize;

use super::table::ExceptionTable;
use crate::shared::models::{method_key, ClassgraphError, LoadedClass, Result};
use crate::shared::utils::intern::InternedString;

/// Exception tables of one class, keyed by `"name descriptor"`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MethodExceptionIndex {
    class_name: Option<InternedString>,
    tables: AHashMap<String, ExceptionTable>,
    #[serde(skip)]
    order: Vec<String>,
}

impl MethodExceptionIndex {
    /// Decode the tables of every method of `class`
    ///
    /// Methods without handlers still get an (empty) table.
    pub fn build(class: &LoadedClass) -> Result<Self> {
        let mut index = Self {
            class_name: Some(class.name.clone()),
            ..Self::default()
        };
        for method in &class.methods {
            let table = ExceptionTable::decode(&method.exception_entries, &class.constant_pool)
                .map_err(|e| {
                    let message = format!("method {}: {}", method.key(), e.message);
                    ClassgraphError::malformed(message)
                        .with_unit(class.name.to_string())
                })?;
            let key = method.key();
            if index.tables.insert(key.clone(), table).is_none() {
                index.order.push(key);
            }
        }
        Ok(index)
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn table(&self, name: &str, descriptor: &str) -> Option<&ExceptionTable> {
        self.tables.get(&method_key(name, descriptor))
    }

    pub fn table_by_key(&self, key: &str) -> Option<&ExceptionTable> {
        self.tables.get(key)
    }

    /// Tables in method declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExceptionTable)> {
        self.order
            .iter()
            .filter_map(move |key| self.tables.get(key).map(|t| (key.as_str(), t)))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

//! Class registry for one batch
//!
//! Holds every unit handed over by the loading collaborator, in registration
//! order. A unit is either a loaded class or a corrupted stream that the
//! loader could not decode; the latter is kept so the driver can report it as
//! a per-unit failure instead of silently losing it.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use super::class_file::LoadedClass;
use crate::shared::utils::intern::{intern, InternedString};

/// One input unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassUnit {
    Loaded(LoadedClass),
    Corrupted {
        name: InternedString,
        reason: String,
    },
}

impl ClassUnit {
    pub fn name(&self) -> &InternedString {
        match self {
            ClassUnit::Loaded(class) => &class.name,
            ClassUnit::Corrupted { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClassContext {
    units: Vec<ClassUnit>,
    by_name: AHashMap<InternedString, usize>,
}

impl ClassContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_classes(classes: impl IntoIterator<Item = LoadedClass>) -> Self {
        let mut context = Self::new();
        for class in classes {
            context.add_class(class);
        }
        context
    }

    /// Register a loaded class; a later registration of the same name replaces
    /// the earlier one in place
    pub fn add_class(&mut self, class: LoadedClass) {
        self.add_unit(ClassUnit::Loaded(class));
    }

    /// Register a unit whose stream was missing or corrupted
    pub fn add_corrupted(&mut self, name: &str, reason: impl Into<String>) {
        self.add_unit(ClassUnit::Corrupted {
            name: intern(name),
            reason: reason.into(),
        });
    }

    pub fn add_unit(&mut self, unit: ClassUnit) {
        let name = unit.name().clone();
        match self.by_name.get(&name) {
            Some(&pos) => self.units[pos] = unit,
            None => {
                self.by_name.insert(name, self.units.len());
                self.units.push(unit);
            }
        }
    }

    pub fn unit(&self, name: &str) -> Option<&ClassUnit> {
        self.by_name.get(name).map(|&pos| &self.units[pos])
    }

    /// Loaded class by internal name (corrupted units are not returned)
    pub fn get(&self, name: &str) -> Option<&LoadedClass> {
        match self.unit(name)? {
            ClassUnit::Loaded(class) => Some(class),
            ClassUnit::Corrupted { .. } => None,
        }
    }

    /// Loaded class that belongs to the input set under decompilation
    pub fn get_own(&self, name: &str) -> Option<&LoadedClass> {
        self.get(name).filter(|class| class.own)
    }

    pub fn is_own(&self, name: &str) -> bool {
        self.get_own(name).is_some()
    }

    /// All units in registration order
    pub fn units(&self) -> &[ClassUnit] {
        &self.units
    }

    /// Loaded own classes in registration order
    pub fn own_classes(&self) -> impl Iterator<Item = &LoadedClass> {
        self.units.iter().filter_map(|unit| match unit {
            ClassUnit::Loaded(class) if class.own => Some(class),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order_and_replacement() {
        let mut context = ClassContext::new();
        context.add_class(LoadedClass::builder("a/A").build());
        context.add_class(LoadedClass::builder("a/B").own(false).build());
        context.add_corrupted("a/C", "truncated constant pool");

        let names: Vec<&str> = context.units().iter().map(|u| &**u.name()).collect();
        assert_eq!(names, vec!["a/A", "a/B", "a/C"]);

        // Replacing keeps the slot
        context.add_class(LoadedClass::builder("a/A").own(false).build());
        assert_eq!(&**context.units()[0].name(), "a/A");
        assert!(!context.is_own("a/A"));
        assert_eq!(context.len(), 3);
    }

    #[test]
    fn test_own_filtering() {
        let context = ClassContext::from_classes(vec![
            LoadedClass::builder("a/A").build(),
            LoadedClass::builder("java/util/List").own(false).build(),
        ]);

        assert!(context.get("java/util/List").is_some());
        assert!(context.get_own("java/util/List").is_none());
        let own: Vec<&str> = context.own_classes().map(|c| &*c.name).collect();
        assert_eq!(own, vec!["a/A"]);
    }

    #[test]
    fn test_corrupted_is_not_loaded() {
        let mut context = ClassContext::new();
        context.add_corrupted("a/C", "bad magic");
        assert!(context.get("a/C").is_none());
        assert!(matches!(
            context.unit("a/C"),
            Some(ClassUnit::Corrupted { .. })
        ));
    }
}

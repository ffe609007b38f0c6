//! Convention-based renaming policy
//!
//! Obfuscated or compiler-mangled class names that cannot appear in Java
//! source (reserved words, names starting with a digit, one- or two-letter
//! names) are replaced. Leading digits are stripped when the rest is a
//! fresh name; everything else becomes `class_<n>`.

use ahash::AHashSet;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::features::renaming::ports::{ElementKind, RenamingPolicy};

const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

/// Policy that never renames
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRenaming;

impl RenamingPolicy for NoRenaming {
    fn should_rename(&self, _kind: ElementKind, _name: &str, _context: Option<&str>) -> bool {
        false
    }

    fn next_class_name(&self, _original_key: &str, name: &str) -> String {
        name.to_string()
    }
}

/// Default policy used when renaming is enabled without a custom policy
#[derive(Debug, Default)]
pub struct ConventionRenamer {
    class_counter: AtomicU32,
    used_names: Mutex<AHashSet<String>>,
}

impl ConventionRenamer {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_class_name(&self) -> String {
        let n = self.class_counter.fetch_add(1, Ordering::Relaxed);
        format!("class_{}", n)
    }
}

impl RenamingPolicy for ConventionRenamer {
    fn should_rename(&self, kind: ElementKind, name: &str, _context: Option<&str>) -> bool {
        if name.len() <= 2 || RESERVED.contains(&name) {
            return true;
        }
        match kind {
            ElementKind::Class => name.starts_with(|c: char| c.is_ascii_digit()),
            ElementKind::Field | ElementKind::Method => false,
        }
    }

    fn next_class_name(&self, _original_key: &str, name: &str) -> String {
        let stripped = name.trim_start_matches(|c: char| c.is_ascii_digit());
        if stripped.len() == name.len() || stripped.is_empty() {
            return self.fresh_class_name();
        }

        let mut used = self.used_names.lock();
        if used.contains(stripped) {
            drop(used);
            return self.fresh_class_name();
        }
        used.insert(stripped.to_string());
        stripped.to_string()
    }
}

//! Subtype oracle backed by the loaded class set
//!
//! Walks super classes and interfaces transitively. Classes outside the
//! context are opaque: they are only subtypes of themselves and of
//! `java/lang/Object`. Answers are memoized per (sub, sup) pair.

use ahash::AHashSet;
use dashmap::DashMap;

use crate::features::exception_handlers::ports::SubtypeOracle;
use crate::shared::models::ClassContext;
use crate::shared::utils::intern::{intern, InternedString};

pub const JAVA_LANG_OBJECT: &str = "java/lang/Object";

pub struct ClassHierarchyOracle<'c> {
    context: &'c ClassContext,
    memo: DashMap<(InternedString, InternedString), bool>,
}

impl<'c> ClassHierarchyOracle<'c> {
    pub fn new(context: &'c ClassContext) -> Self {
        Self {
            context,
            memo: DashMap::new(),
        }
    }

    fn walk(&self, sub: &str, sup: &str) -> bool {
        let mut seen: AHashSet<&str> = AHashSet::new();
        let mut pending: Vec<&str> = vec![sub];

        while let Some(current) = pending.pop() {
            if current == sup {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            if let Some(class) = self.context.get(current) {
                pending.extend(class.super_class.as_deref());
                pending.extend(class.interfaces.iter().map(|name| &**name));
            }
        }
        false
    }

    pub fn cached_pairs(&self) -> usize {
        self.memo.len()
    }
}

impl SubtypeOracle for ClassHierarchyOracle<'_> {
    fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        if sub == sup || sup == JAVA_LANG_OBJECT {
            return true;
        }
        let key = (intern(sub), intern(sup));
        if let Some(hit) = self.memo.get(&key) {
            return *hit;
        }
        let answer = self.walk(sub, sup);
        self.memo.insert(key, answer);
        answer
    }
}

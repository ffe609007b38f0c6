//! Rename Cache
//!
//! Batch-wide memo of renaming decisions keyed by the nested type's internal
//! name. Shared by every worker of a batch; the policy is asked at most once
//! per key, including when two workers race on the same key.

use dashmap::DashMap;

use crate::features::renaming::ports::{ElementKind, RenamingPolicy};
use crate::shared::utils::intern::{intern, InternedString};

/// Thread-safe rename decision cache
#[derive(Debug, Default)]
pub struct RenameCache {
    /// Internal name → replacement (`None` when the policy declined)
    decisions: DashMap<InternedString, Option<InternedString>>,
}

impl RenameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the display name for `key`
    ///
    /// A cached decision always wins. Without one, the policy is consulted
    /// only when `enabled` is set; otherwise `name` is returned unchanged and
    /// nothing is cached.
    pub fn resolve(
        &self,
        policy: &dyn RenamingPolicy,
        key: &InternedString,
        name: &InternedString,
        enabled: bool,
    ) -> InternedString {
        if let Some(decision) = self.decisions.get(key) {
            return decision.clone().unwrap_or_else(|| name.clone());
        }
        if !enabled {
            return name.clone();
        }

        // entry() holds the shard lock while the policy runs: insert-if-absent
        let decision = self
            .decisions
            .entry(key.clone())
            .or_insert_with(|| {
                if policy.should_rename(ElementKind::Class, name, None) {
                    Some(intern(policy.next_class_name(key, name)))
                } else {
                    None
                }
            })
            .clone();

        decision.unwrap_or_else(|| name.clone())
    }

    /// Cached replacement for `key`, if the policy renamed it
    pub fn renamed(&self, key: &str) -> Option<InternedString> {
        self.decisions.get(key).and_then(|d| d.clone())
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    pub fn clear(&self) {
        self.decisions.clear();
    }

    pub fn stats(&self) -> RenameCacheStats {
        let renamed = self
            .decisions
            .iter()
            .filter(|entry| entry.value().is_some())
            .count();
        RenameCacheStats {
            decisions: self.len(),
            renamed,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenameCacheStats {
    pub decisions: usize,
    pub renamed: usize,
}

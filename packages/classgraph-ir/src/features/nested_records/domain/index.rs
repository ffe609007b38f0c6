use ahash::AHashMap;

use super::record::NestedTypeRecord;
use crate::shared::utils::intern::InternedString;

/// Result of offering a record to the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// First record for this inner name
    Inserted,
    /// Same record seen again (redundant metadata)
    Duplicate,
    /// Differs from the first-seen record, which is kept
    Conflict,
}

/// Normalized records and the two nesting indexes
///
/// Every collection keeps insertion order so traversal over the index is
/// deterministic; the "sets" are vectors with membership checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NestedIndex {
    records: AHashMap<InternedString, NestedTypeRecord>,
    record_order: Vec<InternedString>,
    nested_by_enclosing: AHashMap<InternedString, Vec<InternedString>>,
    enclosing_by_nested: AHashMap<InternedString, Vec<InternedString>>,
    /// Inner names in the declaring class's own attribute order
    declared_by: AHashMap<InternedString, Vec<InternedString>>,
}

impl NestedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the first-seen record per inner name
    pub fn merge_record(&mut self, record: &NestedTypeRecord) -> MergeOutcome {
        match self.records.get(&record.inner_name) {
            Some(existing) if existing.agrees_with(record) => MergeOutcome::Duplicate,
            Some(_) => MergeOutcome::Conflict,
            None => {
                self.record_order.push(record.inner_name.clone());
                self.records
                    .insert(record.inner_name.clone(), record.clone());
                MergeOutcome::Inserted
            }
        }
    }

    /// Record a nesting edge in both directions
    pub fn add_edge(&mut self, enclosing: &InternedString, nested: &InternedString) {
        push_unique(
            self.nested_by_enclosing.entry(enclosing.clone()).or_default(),
            nested,
        );
        push_unique(
            self.enclosing_by_nested.entry(nested.clone()).or_default(),
            enclosing,
        );
    }

    /// Remember that `class` lists `inner` in its own attribute
    pub fn add_declared(&mut self, class: &InternedString, inner: &InternedString) {
        push_unique(self.declared_by.entry(class.clone()).or_default(), inner);
    }

    pub fn record(&self, inner_name: &str) -> Option<&NestedTypeRecord> {
        self.records.get(inner_name)
    }

    /// True when `name` is the inner name of some record (so never a root)
    pub fn is_nested(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn nested_of(&self, enclosing: &str) -> &[InternedString] {
        self.nested_by_enclosing
            .get(enclosing)
            .map_or(&[], |v| v.as_slice())
    }

    pub fn enclosing_of(&self, nested: &str) -> &[InternedString] {
        self.enclosing_by_nested
            .get(nested)
            .map_or(&[], |v| v.as_slice())
    }

    pub fn declared_by(&self, class: &str) -> &[InternedString] {
        self.declared_by.get(class).map_or(&[], |v| v.as_slice())
    }

    /// Nested names of `enclosing` in traversal order: the class's own
    /// attribute order first, then names only other classes attributed to it
    pub fn children_in_order(&self, enclosing: &str) -> Vec<InternedString> {
        let nested = self.nested_of(enclosing);
        let mut ordered: Vec<InternedString> = self
            .declared_by(enclosing)
            .iter()
            .filter(|name| nested.contains(*name))
            .cloned()
            .collect();
        for name in nested {
            if !ordered.contains(name) {
                ordered.push(name.clone());
            }
        }
        ordered
    }

    /// Records in first-seen order
    pub fn records(&self) -> impl Iterator<Item = &NestedTypeRecord> {
        self.record_order
            .iter()
            .filter_map(move |name| self.records.get(name))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn push_unique(list: &mut Vec<InternedString>, name: &InternedString) {
    if !list.contains(name) {
        list.push(name.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::nested_records::domain::NestedKind;
    use crate::shared::models::AccessFlags;
    use crate::shared::utils::intern::intern;

    fn record(inner: &str, enclosing: &str, access: AccessFlags) -> NestedTypeRecord {
        NestedTypeRecord {
            inner_name: intern(inner),
            simple_name: Some(intern("Inner")),
            declared_kind: NestedKind::Member,
            access,
            enclosing_name: intern(enclosing),
        }
    }

    #[test]
    fn test_first_record_wins() {
        let mut index = NestedIndex::new();
        let first = record("a/A$Inner", "a/A", AccessFlags::PUBLIC);
        let same = record("a/A$Inner", "a/B", AccessFlags::PUBLIC);
        let other = record("a/A$Inner", "a/A", AccessFlags::PRIVATE);

        assert_eq!(index.merge_record(&first), MergeOutcome::Inserted);
        assert_eq!(index.merge_record(&same), MergeOutcome::Duplicate);
        assert_eq!(index.merge_record(&other), MergeOutcome::Conflict);
        assert_eq!(index.record("a/A$Inner").unwrap().access, AccessFlags::PUBLIC);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_edges_are_deduplicated_both_ways() {
        let mut index = NestedIndex::new();
        let (a, b, inner) = (intern("a/A"), intern("a/B"), intern("a/A$Inner"));
        index.add_edge(&a, &inner);
        index.add_edge(&a, &inner);
        index.add_edge(&b, &inner);

        assert_eq!(index.nested_of("a/A").len(), 1);
        assert_eq!(index.enclosing_of("a/A$Inner"), &[a, b]);
        assert!(index.nested_of("a/Unknown").is_empty());
    }

    #[test]
    fn test_children_order_prefers_own_declaration() {
        let mut index = NestedIndex::new();
        let outer = intern("a/A");
        let (x, y, z) = (intern("a/A$X"), intern("a/A$Y"), intern("a/A$Z"));

        // z attributed by another class first, then a/A declares y, x
        index.add_edge(&outer, &z);
        index.add_edge(&outer, &y);
        index.add_edge(&outer, &x);
        index.add_declared(&outer, &y);
        index.add_declared(&outer, &x);

        assert_eq!(index.children_in_order("a/A"), vec![y, x, z]);
    }
}

// Class Tree Builder - NestedIndex → ClassForest
//
// Breadth-first walk from every top-level class over the normalized
// nesting index. One visited set spans all roots, so a class reachable from
// several enclosing classes is attached exactly once (first BFS wins).
// Rolling back a failed root also forgets what that root visited, so a later
// root can still claim the shared nested classes.
//
// Per-kind corrections applied when a nested node is materialized:
// - ANONYMOUS: STATIC cleared, interface type from the sole interface (or
//   the first one, with a warning) or else the super class
// - LOCAL: access masked to ABSTRACT | FINAL
// - MEMBER: copied as declared

use ahash::AHashSet;
use std::collections::VecDeque;
use tracing::debug;

use crate::features::class_tree::domain::{Checkpoint, ClassForest, ClassKind, ClassNode, NodeId};
use crate::features::nested_records::{NestedIndex, NestedTypeRecord};
use crate::session::DecompileSession;
use crate::shared::models::{AccessFlags, ClassContext, LoadedClass, Result};
use crate::shared::utils::intern::InternedString;

pub struct ClassTreeBuilder<'a> {
    session: &'a DecompileSession,
    context: &'a ClassContext,
    index: &'a NestedIndex,
    /// Units that already failed; never materialized
    skipped: AHashSet<InternedString>,
    visited: AHashSet<InternedString>,
    /// `visited` in insertion order, for rollback
    visit_log: Vec<InternedString>,
    /// Classes dropped together with a failed root
    abandoned: AHashSet<InternedString>,
    forest: ClassForest,
}

/// Forest checkpoint plus the visited-set position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildMark {
    forest: Checkpoint,
    visited: usize,
}

impl<'a> ClassTreeBuilder<'a> {
    pub fn new(
        session: &'a DecompileSession,
        context: &'a ClassContext,
        index: &'a NestedIndex,
    ) -> Self {
        Self {
            session,
            context,
            index,
            skipped: AHashSet::new(),
            visited: AHashSet::new(),
            visit_log: Vec::new(),
            abandoned: AHashSet::new(),
            forest: ClassForest::new(),
        }
    }

    pub fn skip<I>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = InternedString>,
    {
        self.skipped.extend(names);
        self
    }

    fn decompile_inner(&self) -> bool {
        self.session.config().decompile_inner
    }

    /// Own classes heading a tree, in registration order
    pub fn root_classes(&self) -> Vec<&'a LoadedClass> {
        let nested_aware = self.decompile_inner();
        self.context
            .own_classes()
            .filter(|class| !self.skipped.contains(&class.name))
            .filter(|class| !nested_aware || !self.index.is_nested(&class.name))
            .collect()
    }

    /// Build the tree headed by `root`
    ///
    /// On error the forest may hold a partial subtree; callers roll back to
    /// a [`BuildMark`] taken before the call.
    pub fn build_root(&mut self, root: &LoadedClass) -> Result<NodeId> {
        let root_id = self.forest.add_root(ClassNode::root(root))?;
        self.visit(&root.name);

        if !self.decompile_inner() {
            return Ok(root_id);
        }

        let mut queue = VecDeque::new();
        queue.push_back((root_id, root.name.clone()));

        while let Some((parent_id, parent_name)) = queue.pop_front() {
            for nested in self.index.children_in_order(&parent_name) {
                if !self.visit(&nested) {
                    continue;
                }
                if self.skipped.contains(&nested) {
                    debug!("skipping failed nested unit {}", nested);
                    continue;
                }

                let resolved = self
                    .index
                    .record(&nested)
                    .zip(self.context.get_own(&nested));
                let Some((record, class)) = resolved else {
                    self.session
                        .warn(&format!("Nested class {} missing!", nested));
                    continue;
                };

                let node = self.materialize(record, class);
                let id = self.forest.attach(parent_id, node)?;
                queue.push_back((id, nested));
            }
        }

        Ok(root_id)
    }

    fn visit(&mut self, name: &InternedString) -> bool {
        if !self.visited.insert(name.clone()) {
            return false;
        }
        self.visit_log.push(name.clone());
        true
    }

    fn materialize(&self, record: &NestedTypeRecord, class: &LoadedClass) -> ClassNode {
        let mut node = ClassNode {
            kind: ClassKind::from(record.declared_kind),
            qualified_name: class.name.clone(),
            access: record.access,
            simple_name: record.simple_name.clone(),
            parent: None,
            children: Vec::new(),
            enclosing_classes: self.index.enclosing_of(&record.inner_name).to_vec(),
            interface_type: None,
            lambda: None,
            enclosing_method: None,
        };

        match node.kind {
            ClassKind::Anonymous => {
                // javac has emitted ACC_STATIC on anonymous classes
                node.access.remove(AccessFlags::STATIC);
                node.interface_type = match class.interfaces.as_slice() {
                    [] => class.super_class.clone(),
                    [only] => Some(only.clone()),
                    [first, ..] => {
                        self.session.warn(&format!(
                            "Inconsistent anonymous class definition: {}",
                            class.name
                        ));
                        Some(first.clone())
                    }
                };
                node.enclosing_method = class.enclosing_method.clone();
            }
            ClassKind::Local => {
                node.access.retain(AccessFlags::LOCAL_CLASS_MASK);
                node.enclosing_method = class.enclosing_method.clone();
            }
            ClassKind::Member | ClassKind::Root | ClassKind::Lambda => {}
        }

        node
    }

    pub fn forest(&self) -> &ClassForest {
        &self.forest
    }

    pub fn forest_mut(&mut self) -> &mut ClassForest {
        &mut self.forest
    }

    pub fn checkpoint(&self) -> BuildMark {
        BuildMark {
            forest: self.forest.checkpoint(),
            visited: self.visit_log.len(),
        }
    }

    /// Undo everything since `mark`; returns the class names it forgot
    pub fn rollback(&mut self, mark: BuildMark) -> Vec<InternedString> {
        self.forest.rollback(mark.forest);
        let forgotten = self.visit_log.split_off(mark.visited.min(self.visit_log.len()));
        for name in &forgotten {
            self.visited.remove(name);
            self.abandoned.insert(name.clone());
        }
        forgotten
    }

    /// Report indexed nested names no root reached and hand out the forest
    pub fn finish(mut self) -> ClassForest {
        let unattached: Vec<InternedString> = self
            .index
            .records()
            .map(|record| record.inner_name.clone())
            .filter(|name| !self.visited.contains(name))
            .collect();

        for name in &unattached {
            if self.abandoned.contains(name) {
                self.session.warn(&format!(
                    "Nested class {} dropped with its failed top-level class",
                    name
                ));
            } else {
                self.session.warn(&format!(
                    "Nested class {} is not reachable from any top-level class",
                    name
                ));
            }
        }

        debug!(
            "class forest: {} roots, {} nodes, {} unattached",
            self.forest.roots().len(),
            self.forest.len(),
            unattached.len()
        );
        self.forest.set_unattached(unattached);
        self.forest
    }

    /// Build every root; a root that fails is rolled back and logged
    pub fn build(mut self) -> ClassForest {
        for root in self.root_classes() {
            let mark = self.checkpoint();
            if let Err(error) = self.build_root(root) {
                self.session
                    .error(&error.with_unit(root.name.to_string()).to_string());
                self.rollback(mark);
            }
        }
        self.finish()
    }
}

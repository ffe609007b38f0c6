//! Custom assertions for test verification
//!
//! Structural invariants every built forest must satisfy.

use ahash::AHashSet;
use classgraph_ir::{AccessFlags, ClassForest, ClassKind};

/// Every node is reachable from exactly one root, parent and child links
/// agree, and no class is attached twice
pub fn assert_forest_shape(forest: &ClassForest) {
    let mut seen = AHashSet::new();
    for &root in forest.roots() {
        assert_eq!(forest.node(root).kind, ClassKind::Root);
        assert!(forest.parent(root).is_none(), "root {} has a parent", root);
        for id in forest.subtree(root) {
            assert!(seen.insert(id), "node {} reached twice", id);
            for &child in forest.children(id) {
                assert_eq!(forest.parent(child), Some(id), "child {} parent link", child);
            }
        }
    }
    assert_eq!(seen.len(), forest.len(), "nodes outside every root tree");

    let mut names = AHashSet::new();
    for (_, node) in forest.iter().filter(|(_, node)| !node.is_lambda()) {
        assert!(
            names.insert(node.qualified_name.clone()),
            "{} attached twice",
            node.qualified_name
        );
    }
}

/// Per-kind flag and payload invariants
pub fn assert_kind_invariants(forest: &ClassForest) {
    for (id, node) in forest.iter() {
        match node.kind {
            ClassKind::Anonymous => {
                assert!(!node.access.contains(AccessFlags::STATIC), "{} is static", id);
            }
            ClassKind::Local => {
                assert!(
                    node.access.is_subset_of(AccessFlags::LOCAL_CLASS_MASK),
                    "{} has flags {}",
                    id,
                    node.access
                );
            }
            ClassKind::Lambda => {
                assert!(node.children.is_empty(), "lambda {} has children", id);
                assert!(node.lambda.is_some());
            }
            ClassKind::Root | ClassKind::Member => {
                assert!(node.lambda.is_none());
            }
        }
    }
}

//! Class forest construction through the batch driver

mod common;

use classgraph_ir::{
    AccessFlags, ClassContext, ClassKind, DecompileConfig, LoadedClass, Preset, Severity,
};
use common::*;
use pretty_assertions::assert_eq;

#[test]
fn test_anonymous_static_cleared_and_interface_recorded() {
    // root R, nested R$1: anonymous, STATIC, implements exactly I
    let (session, _) = collecting_session();
    let context = ClassContext::from_classes(vec![
        LoadedClass::builder("R")
            .inner_class("R$1", None, None, AccessFlags::STATIC | AccessFlags::FINAL)
            .build(),
        LoadedClass::builder("R$1").interface("I").build(),
    ]);

    let forest = build_forest(&session, &context);
    let root = forest.node_of("R").unwrap();
    let anon = forest.find_child(root, "R$1").unwrap();
    let node = forest.node(anon);

    assert_eq!(node.kind, ClassKind::Anonymous);
    assert!(!node.access.contains(AccessFlags::STATIC));
    assert!(node.access.contains(AccessFlags::FINAL));
    assert_eq!(node.interface_type.as_deref(), Some("I"));
    assert_eq!(node.simple_name, None);
}

#[test]
fn test_enclosing_class_outside_input_is_never_attached() {
    let (session, sink) = collecting_session();
    let context = ClassContext::from_classes(vec![
        LoadedClass::builder("app/Main")
            .inner_class("lib/Map$Entry", Some("lib/Map"), Some("Entry"), AccessFlags::PUBLIC)
            .build(),
        LoadedClass::builder("app/Util").build(),
    ]);

    let outcome = run(&session, &context);
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.forest.roots().len(), 2);
    assert_eq!(outcome.forest.node_of("lib/Map$Entry"), None);
    assert!(sink.contains(Severity::Warn, "lib/Map$Entry"));
}

#[test]
fn test_nested_fixture_shape() {
    let (session, sink) = collecting_session();
    let forest = build_forest(&session, &outer_with_nested());

    assert_forest_shape(&forest);
    assert_kind_invariants(&forest);
    assert_eq!(sink.count(Severity::Warn), 0);

    let outer = forest.node_of("app/Outer").unwrap();
    let names: Vec<&str> = forest
        .children(outer)
        .iter()
        .map(|&id| &*forest.node(id).qualified_name)
        .collect();
    assert_eq!(names, vec!["app/Outer$Inner", "app/Outer$1", "app/Outer$1Helper"]);

    let deep = forest.node_of("app/Outer$Inner$Deep").unwrap();
    assert_eq!(forest.node(deep).kind, ClassKind::Member);
    assert_eq!(forest.root_of("app/Outer$Inner$Deep"), Some(outer));
    assert_eq!(forest.ancestors(deep).count(), 2);

    let helper = forest.node(forest.node_of("app/Outer$1Helper").unwrap());
    assert_eq!(helper.kind, ClassKind::Local);
    assert_eq!(helper.access, AccessFlags::FINAL);
    assert_eq!(helper.enclosing_classes.len(), 1);

    let roots: Vec<&str> = forest
        .roots()
        .iter()
        .map(|&id| &*forest.node(id).qualified_name)
        .collect();
    assert_eq!(roots, vec!["app/Outer", "app/Other"]);
}

#[test]
fn test_root_simple_name_is_last_segment() {
    let (session, _) = collecting_session();
    let forest = build_forest(&session, &outer_with_nested());
    let root = forest.node(forest.node_of("app/Outer").unwrap());
    assert_eq!(root.simple_name.as_deref(), Some("Outer"));
}

#[test]
fn test_no_records_gives_childless_roots() {
    let (session, _) = collecting_session();
    let context = ClassContext::from_classes(vec![
        LoadedClass::builder("a/A").build(),
        LoadedClass::builder("a/B").build(),
        LoadedClass::builder("a/C").own(false).build(),
    ]);

    let forest = build_forest(&session, &context);
    assert_eq!(forest.roots().len(), 2);
    assert_eq!(forest.len(), 2);
    assert!(forest.iter().all(|(_, node)| node.children.is_empty()));
}

#[test]
fn test_flat_preset_keeps_every_class_as_root() {
    let (session, _) = collecting_session_with(DecompileConfig::preset(Preset::Flat));
    let forest = build_forest(&session, &outer_with_nested());

    assert_eq!(forest.roots().len(), 6);
    assert!(forest
        .iter()
        .all(|(_, node)| node.kind == ClassKind::Root && node.children.is_empty()));
}

#[test]
fn test_build_is_idempotent() {
    let context = outer_with_nested();
    let (first_session, _) = collecting_session();
    let (second_session, _) = collecting_session();

    let first = build_forest(&first_session, &context);
    let second = build_forest(&second_session, &context);
    assert_eq!(first, second);
}

#[test]
fn test_nested_reachable_from_two_enclosers_attached_once() {
    // a/B claims a/A$X as well; the first BFS to reach it wins
    let (session, _) = collecting_session();
    let context = ClassContext::from_classes(vec![
        LoadedClass::builder("a/A")
            .inner_class("a/A$X", Some("a/A"), Some("X"), AccessFlags::PUBLIC)
            .build(),
        LoadedClass::builder("a/B")
            .inner_class("a/A$X", Some("a/B"), Some("X"), AccessFlags::PUBLIC)
            .build(),
        LoadedClass::builder("a/A$X").build(),
    ]);

    let forest = build_forest(&session, &context);
    assert_forest_shape(&forest);
    let x = forest.node_of("a/A$X").unwrap();
    assert_eq!(forest.parent(x), forest.node_of("a/A"));
    assert_eq!(forest.node(x).enclosing_classes.len(), 2);
}

#[test]
fn test_unreachable_nested_names_are_reported() {
    // a/P$Inner and a/P$Q claim each other: a nesting cycle with no root
    // above it
    let (session, sink) = collecting_session();
    let context = ClassContext::from_classes(vec![
        LoadedClass::builder("a/P$Inner")
            .inner_class("a/P$Q", Some("a/P$Inner"), Some("Q"), AccessFlags::PUBLIC)
            .build(),
        LoadedClass::builder("a/P$Q")
            .inner_class("a/P$Inner", Some("a/P$Q"), Some("Inner"), AccessFlags::PUBLIC)
            .build(),
        LoadedClass::builder("a/Main").build(),
    ]);

    let forest = build_forest(&session, &context);
    assert_eq!(forest.roots().len(), 1);
    let mut unattached: Vec<&str> = forest.unattached().iter().map(|n| &**n).collect();
    unattached.sort();
    assert_eq!(unattached, vec!["a/P$Inner", "a/P$Q"]);
    assert!(sink.contains(Severity::Warn, "not reachable"));
}

//! Property tests over randomly nested class sets

mod common;

use classgraph_ir::shared::intern;
use classgraph_ir::{
    AccessFlags, ClassContext, ClassForest, ClassKind, DecompileConfig, ExceptionHandler,
    ExceptionTable, LoadedClass, Preset, SubtypeOracle,
};
use common::*;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Declared {
    Member,
    Anonymous,
    Local,
}

/// Class `i` is nested in `parent` (always `< i`) or top-level
#[derive(Debug, Clone)]
struct Shape {
    parent: Option<usize>,
    declared: Declared,
    access: AccessFlags,
}

fn class_name(i: usize) -> String {
    format!("p/K{}", i)
}

fn declared() -> impl Strategy<Value = Declared> {
    prop_oneof![
        Just(Declared::Member),
        Just(Declared::Anonymous),
        Just(Declared::Local),
    ]
}

fn shapes() -> impl Strategy<Value = Vec<Shape>> {
    prop::collection::vec((any::<Option<u8>>(), declared(), any::<u16>()), 1..24).prop_map(
        |raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (selector, declared, bits))| Shape {
                    parent: match selector {
                        Some(s) if i > 0 => Some(s as usize % i),
                        _ => None,
                    },
                    declared,
                    access: AccessFlags::from_bits(bits),
                })
                .collect()
        },
    )
}

/// (inner, outer, simple name, access) as listed in an InnerClasses attribute
type Entry = (String, Option<String>, Option<String>, AccessFlags);

/// The entry describing class `i` when declared by `holder`
fn entry_for(shapes: &[Shape], i: usize, holder: usize) -> Entry {
    let shape = &shapes[i];
    let simple = Some(format!("N{}", i));
    match shape.declared {
        Declared::Member => {
            let outer = shape.parent.unwrap_or(holder);
            (class_name(i), Some(class_name(outer)), simple, shape.access)
        }
        Declared::Anonymous => (class_name(i), None, None, shape.access),
        Declared::Local => (class_name(i), None, simple, shape.access),
    }
}

/// `extra` lists (holder, target) pairs: `holder` also declares `target`,
/// which is redundant for members and a second attribution otherwise
fn context_for(shapes: &[Shape], extra: &[(usize, usize)]) -> ClassContext {
    let mut declared: Vec<Vec<Entry>> = vec![Vec::new(); shapes.len()];

    for (i, shape) in shapes.iter().enumerate() {
        let Some(parent) = shape.parent else { continue };
        declared[parent].push(entry_for(shapes, i, parent));
        if shape.declared == Declared::Member {
            declared[i].push(entry_for(shapes, i, parent));
        }
    }
    for &(holder, target) in extra {
        let (holder, target) = (holder % shapes.len(), target % shapes.len());
        declared[holder].push(entry_for(shapes, target, holder));
    }

    ClassContext::from_classes(declared.into_iter().enumerate().map(|(i, entries)| {
        entries
            .iter()
            .fold(LoadedClass::builder(&class_name(i)), |builder, (inner, outer, simple, access)| {
                builder.inner_class(inner, outer.as_deref(), simple.as_deref(), *access)
            })
            .build()
    }))
}

/// Every class is either attached once or reported unattached, and every
/// nested node hangs under one of the classes that declared it
fn assert_accounted_for(forest: &ClassForest, classes: usize) {
    for i in 0..classes {
        let name = class_name(i);
        let attached = forest.node_of(&name).is_some();
        let unattached = forest.unattached().iter().any(|n| **n == *name);
        assert!(attached != unattached, "{} attached={} unattached={}", name, attached, unattached);
    }
    for (id, node) in forest.iter().filter(|(_, node)| !node.is_lambda()) {
        if let Some(parent) = forest.parent(id) {
            let parent_name = &forest.node(parent).qualified_name;
            assert!(
                node.enclosing_classes.contains(parent_name),
                "{} attached under {} which never declared it",
                node.qualified_name,
                parent_name
            );
        }
    }
}

/// Types `T0..Tn`; `parents[k]` is the direct super type of `T(k+1)`
struct ChainOracle {
    parents: Vec<usize>,
}

impl ChainOracle {
    fn index(name: &str) -> usize {
        name[1..].parse().unwrap()
    }
}

impl SubtypeOracle for ChainOracle {
    fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        let target = Self::index(sup);
        let mut current = Self::index(sub);
        loop {
            if current == target {
                return true;
            }
            if current == 0 {
                return false;
            }
            current = self.parents[current - 1];
        }
    }
}

fn type_name(k: usize) -> String {
    format!("T{}", k)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_every_class_attached_under_its_encloser(shapes in shapes()) {
        let (session, _) = collecting_session();
        let forest = build_forest(&session, &context_for(&shapes, &[]));

        assert_forest_shape(&forest);
        assert_kind_invariants(&forest);
        prop_assert_eq!(forest.len(), shapes.len());
        prop_assert!(forest.unattached().is_empty());

        for (i, shape) in shapes.iter().enumerate() {
            let id = forest.node_of(&class_name(i)).unwrap();
            let node = forest.node(id);
            let Some(parent) = shape.parent else {
                prop_assert_eq!(node.kind, ClassKind::Root);
                prop_assert!(forest.roots().contains(&id));
                continue;
            };
            prop_assert_eq!(forest.parent(id), forest.node_of(&class_name(parent)));

            let mut corrected = shape.access;
            let expected_kind = match shape.declared {
                Declared::Member => ClassKind::Member,
                Declared::Anonymous => {
                    corrected.remove(AccessFlags::STATIC);
                    ClassKind::Anonymous
                }
                Declared::Local => {
                    corrected.retain(AccessFlags::LOCAL_CLASS_MASK);
                    ClassKind::Local
                }
            };
            prop_assert_eq!(node.kind, expected_kind);
            prop_assert_eq!(node.access, corrected);
        }
    }

    #[test]
    fn prop_redundant_and_cyclic_attributions_keep_forest_shape(
        shapes in shapes(),
        extra in prop::collection::vec((any::<u8>(), any::<u8>()), 0..12),
    ) {
        let extra: Vec<(usize, usize)> =
            extra.into_iter().map(|(h, t)| (h as usize, t as usize)).collect();
        let (session, _) = collecting_session();
        let forest = build_forest(&session, &context_for(&shapes, &extra));

        assert_forest_shape(&forest);
        assert_kind_invariants(&forest);
        assert_accounted_for(&forest, shapes.len());
    }

    #[test]
    fn prop_sequential_and_parallel_agree(
        shapes in shapes(),
        extra in prop::collection::vec((any::<u8>(), any::<u8>()), 0..6),
        rename in any::<bool>(),
    ) {
        let extra: Vec<(usize, usize)> =
            extra.into_iter().map(|(h, t)| (h as usize, t as usize)).collect();
        let context = context_for(&shapes, &extra);
        let preset = if rename { Preset::Renaming } else { Preset::Structure };
        let (sequential, _) = collecting_session_with(
            DecompileConfig::preset(preset).parallel(|p| p.enabled(false)),
        );
        let (parallel, _) = collecting_session_with(
            DecompileConfig::preset(preset).parallel(|p| p.num_threads(4)),
        );

        prop_assert_eq!(
            build_forest(&sequential, &context),
            build_forest(&parallel, &context)
        );
    }

    #[test]
    fn prop_lookup_returns_first_covering_catch_all(
        ranges in prop::collection::vec((0u32..40, 0u32..20, any::<bool>()), 0..12),
        line in 0u32..60,
    ) {
        let handlers: Vec<ExceptionHandler> = ranges
            .iter()
            .enumerate()
            .map(|(i, &(start, len, typed))| ExceptionHandler {
                start_line: start,
                end_line: start + len,
                handler_line: 100 + i as u32,
                exception_type: typed.then(|| intern("T0")),
            })
            .collect();
        let expected = handlers
            .iter()
            .find(|h| h.covers(line) && h.is_catch_all())
            .map(|h| h.handler_line);

        let table = ExceptionTable::new(handlers);
        let oracle = ChainOracle { parents: Vec::new() };
        prop_assert_eq!(
            table.lookup(&oracle, line, None, true).map(|h| h.handler_line),
            expected
        );
        prop_assert!(table.lookup(&oracle, line, None, false).is_none());
    }

    #[test]
    fn prop_lookup_returns_first_matching_typed_handler(
        parent_selectors in prop::collection::vec(any::<u8>(), 0..6),
        raw_handlers in prop::collection::vec(
            (0u32..40, 0u32..20, any::<Option<u8>>()),
            0..12,
        ),
        line in 0u32..60,
        thrown in any::<Option<u8>>(),
        include_any in any::<bool>(),
    ) {
        // T(k+1) extends some T(j) with j <= k, so T0 is the single top type
        let parents: Vec<usize> = parent_selectors
            .iter()
            .enumerate()
            .map(|(k, &s)| s as usize % (k + 1))
            .collect();
        let types = parents.len() + 1;
        let oracle = ChainOracle { parents };

        let handlers: Vec<ExceptionHandler> = raw_handlers
            .iter()
            .enumerate()
            .map(|(i, &(start, len, ty))| ExceptionHandler {
                start_line: start,
                end_line: start + len,
                handler_line: 100 + i as u32,
                exception_type: ty.map(|t| intern(type_name(t as usize % types))),
            })
            .collect();
        let thrown = thrown.map(|t| type_name(t as usize % types));

        let expected = handlers.iter().position(|h| {
            h.covers(line)
                && match (&h.exception_type, &thrown) {
                    (None, _) => include_any,
                    (Some(caught), Some(thrown)) => oracle.is_subtype(thrown, caught),
                    (Some(_), None) => false,
                }
        });

        let table = ExceptionTable::new(handlers);
        let found = table
            .lookup(&oracle, line, thrown.as_deref(), include_any)
            .map(|h| (h.handler_line - 100) as usize);
        prop_assert_eq!(found, expected);

        // The table hands back its own entry, not a copy
        if let Some(index) = found {
            let handler = table.lookup(&oracle, line, thrown.as_deref(), include_any).unwrap();
            prop_assert!(std::ptr::eq(handler, &table.handlers()[index]));
        }
    }
}

//! Batch driver
//!
//! Runs the structural passes over one class set:
//! 1. decode nested-type tuples per class (parallel), merge in order
//! 2. build per-class exception indexes (parallel)
//! 3. BFS one tree per root, then attach that tree's lambdas
//!
//! A unit that hits a fatal error is reported in
//! [`BatchOutcome::failures`] and skipped; a root whose tree fails is rolled
//! back out of the arena, and its nested classes (with their call sites) stay
//! available to later roots. Results never depend on scheduling because every
//! parallel phase is collected and merged in registration order, and renaming
//! only happens during that merge.

use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

use super::batch::{BatchOutcome, ClassBatch};
use crate::features::class_tree::{ClassForest, ClassTreeBuilder, NodeId};
use crate::features::exception_handlers::MethodExceptionIndex;
use crate::features::lambda::{CallSiteDescriptor, LambdaSynthesizer};
use crate::features::nested_records::{DecodedUnit, NestedIndex, RecordNormalizer};
use crate::session::DecompileSession;
use crate::shared::models::{
    ClassContext, ClassUnit, ClassgraphError, LoadedClass, Result, UnitFailure,
};
use crate::shared::utils::intern::InternedString;

pub struct ClassTreeDriver<'s> {
    session: &'s DecompileSession,
}

impl<'s> ClassTreeDriver<'s> {
    pub fn new(session: &'s DecompileSession) -> Self {
        Self { session }
    }

    fn parallel(&self) -> bool {
        cfg!(feature = "parallel") && self.session.config().parallel.enabled
    }

    /// Run every pass over `context`
    ///
    /// Only setup problems (invalid configuration, the dedicated thread
    /// pool) are returned as `Err`; per-unit errors end up in the outcome.
    pub fn run(&self, context: &ClassContext, call_sites: &[CallSiteDescriptor]) -> Result<BatchOutcome> {
        self.session.config().validate()?;
        let start = Instant::now();
        let pool = self.thread_pool()?;

        let (index, exception_indexes, mut failures) = match &pool {
            Some(pool) => pool.install(|| self.parallel_phases(context)),
            None => self.parallel_phases(context),
        };

        let skipped: AHashSet<InternedString> =
            failures.iter().map(|failure| failure.unit.clone()).collect();
        let forest = self.build_forest(context, &index, call_sites, &skipped, &mut failures);

        info!(
            "class forest built in {:?}: {} roots, {} nodes, {} failed units",
            start.elapsed(),
            forest.roots().len(),
            forest.len(),
            failures.len()
        );

        Ok(BatchOutcome {
            forest,
            exception_indexes,
            failures,
        })
    }

    /// Convenience entry point for a deserialized batch
    pub fn run_batch(&self, batch: &ClassBatch) -> Result<BatchOutcome> {
        self.run(&batch.context(), &batch.call_sites)
    }

    fn thread_pool(&self) -> Result<Option<rayon::ThreadPool>> {
        let parallel = &self.session.config().parallel;
        if !self.parallel() {
            return Ok(None);
        }
        let Some(threads) = parallel.num_threads else {
            return Ok(None);
        };
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("classgraph-worker-{}", i))
            .build()
            .map(Some)
            .map_err(|e| ClassgraphError::internal(format!("failed to build thread pool: {}", e)))
    }

    // ============================================================
    // Phases 1 and 2
    // ============================================================

    fn parallel_phases(
        &self,
        context: &ClassContext,
    ) -> (NestedIndex, Vec<MethodExceptionIndex>, Vec<UnitFailure>) {
        let normalizer = RecordNormalizer::new(self.session);
        let decode_inner = self.session.config().decompile_inner;

        let decoded: Vec<DecodedUnit<'_>> = if self.parallel() {
            context
                .units()
                .par_iter()
                .filter_map(|unit| decode(&normalizer, unit, decode_inner))
                .collect()
        } else {
            context
                .units()
                .iter()
                .filter_map(|unit| decode(&normalizer, unit, decode_inner))
                .collect()
        };

        let outcome = normalizer.merge_all(context, decoded);
        let mut failures = outcome.failures;

        let failed: AHashSet<InternedString> =
            failures.iter().map(|failure| failure.unit.clone()).collect();
        let candidates: Vec<&LoadedClass> = context
            .own_classes()
            .filter(|class| !failed.contains(&class.name))
            .collect();

        let built: Vec<Result<MethodExceptionIndex>> = if self.parallel() {
            candidates
                .par_iter()
                .map(|class| MethodExceptionIndex::build(class))
                .collect()
        } else {
            candidates
                .iter()
                .map(|class| MethodExceptionIndex::build(class))
                .collect()
        };

        let mut exception_indexes = Vec::with_capacity(built.len());
        for (class, result) in candidates.iter().zip(built) {
            match result {
                Ok(index) => exception_indexes.push(index),
                Err(error) => {
                    self.session.error(&error.to_string());
                    failures.push(UnitFailure::new(class.name.clone(), error));
                }
            }
        }

        debug!(
            "decoded {} nested records and {} exception indexes",
            outcome.index.len(),
            exception_indexes.len()
        );
        (outcome.index, exception_indexes, failures)
    }

    // ============================================================
    // Phase 3
    // ============================================================

    fn build_forest(
        &self,
        context: &ClassContext,
        index: &NestedIndex,
        call_sites: &[CallSiteDescriptor],
        skipped: &AHashSet<InternedString>,
        failures: &mut Vec<UnitFailure>,
    ) -> ClassForest {
        let synthesizer = LambdaSynthesizer::new(self.session);
        let mut sites_by_class = group_call_sites(call_sites);
        let mut builder =
            ClassTreeBuilder::new(self.session, context, index).skip(skipped.iter().cloned());

        // Classes removed together with a failed root
        let mut abandoned = AHashSet::new();

        for root in builder.root_classes() {
            let mark = builder.checkpoint();
            let mut claimed = Vec::new();
            let built = builder.build_root(root).and_then(|root_id| {
                claimed = claim_sites(builder.forest(), root_id, &mut sites_by_class);
                self.attach_lambdas(&synthesizer, &mut builder, context, &claimed)
            });
            if let Err(error) = built {
                let error = match error.unit {
                    Some(_) => error,
                    None => error.with_unit(root.name.to_string()),
                };
                self.session.error(&error.to_string());
                abandoned.extend(builder.rollback(mark));
                // Nested classes of the failed tree may still be claimed by a
                // later root, together with their call sites
                for (class_name, sites) in claimed {
                    sites_by_class.restore(class_name, sites);
                }
                failures.push(UnitFailure::new(root.name.clone(), error));
            }
        }

        let mut forest = builder.finish();

        // Call sites whose declaring class never got a node
        for (class_name, sites) in sites_by_class.drain_ordered() {
            if skipped.contains(&class_name) || failures.iter().any(|f| f.unit == class_name) {
                continue;
            }
            if abandoned.contains(&class_name) && forest.node_of(&class_name).is_none() {
                debug!("dropping {} call sites of abandoned class {}", sites.len(), class_name);
                continue;
            }
            if let Err(error) = synthesizer.attach_all(&mut forest, context, &sites) {
                self.session.error(&error.to_string());
                failures.push(UnitFailure::new(class_name, error));
            }
        }

        forest
    }

    /// Attach the call sites claimed for one tree
    fn attach_lambdas(
        &self,
        synthesizer: &LambdaSynthesizer<'_>,
        builder: &mut ClassTreeBuilder<'_>,
        context: &ClassContext,
        claimed: &[(InternedString, Vec<CallSiteDescriptor>)],
    ) -> Result<()> {
        for (_, sites) in claimed {
            synthesizer.attach_all(builder.forest_mut(), context, sites)?;
        }
        Ok(())
    }
}

/// Take the call sites of every class in the subtree at `root_id`
fn claim_sites(
    forest: &ClassForest,
    root_id: NodeId,
    sites_by_class: &mut CallSiteGroups,
) -> Vec<(InternedString, Vec<CallSiteDescriptor>)> {
    forest
        .subtree(root_id)
        .into_iter()
        .filter_map(|id| {
            let name = &forest.node(id).qualified_name;
            sites_by_class.take(name).map(|sites| (name.clone(), sites))
        })
        .collect()
}

/// Call sites grouped by declaring class, first-appearance order
#[derive(Debug, Default)]
struct CallSiteGroups {
    order: Vec<InternedString>,
    sites: AHashMap<InternedString, Vec<CallSiteDescriptor>>,
}

impl CallSiteGroups {
    fn take(&mut self, class_name: &str) -> Option<Vec<CallSiteDescriptor>> {
        self.sites.remove(class_name)
    }

    /// Put back sites taken for a tree that was rolled back
    fn restore(&mut self, class_name: InternedString, sites: Vec<CallSiteDescriptor>) {
        self.sites.insert(class_name, sites);
    }

    fn drain_ordered(&mut self) -> Vec<(InternedString, Vec<CallSiteDescriptor>)> {
        let order = std::mem::take(&mut self.order);
        order
            .into_iter()
            .filter_map(|name| self.sites.remove(&name).map(|sites| (name, sites)))
            .collect()
    }
}

fn group_call_sites(call_sites: &[CallSiteDescriptor]) -> CallSiteGroups {
    let mut groups = CallSiteGroups::default();
    for site in call_sites {
        if !groups.sites.contains_key(&site.declaring_class) {
            groups.order.push(site.declaring_class.clone());
        }
        groups
            .sites
            .entry(site.declaring_class.clone())
            .or_default()
            .push(site.clone());
    }
    groups
}

/// Nested-type decoding for one unit; loaded classes are left out when
/// nested classes are not reconstructed
fn decode<'c>(
    normalizer: &RecordNormalizer<'_>,
    unit: &'c ClassUnit,
    decode_inner: bool,
) -> Option<DecodedUnit<'c>> {
    match unit {
        ClassUnit::Loaded(_) if !decode_inner => None,
        _ => normalizer.decode_unit(unit),
    }
}

//! Record Normalizer
//!
//! Two phases so decoding can run per class on worker threads while the
//! index stays deterministic:
//! 1. `decode_class` - resolve one class's raw InnerClasses tuples (fatal on
//!    malformed indices, reads only the class itself)
//! 2. `merge_class` - apply renaming and fold decoded records into the index
//!    in registration order (first record wins, inconsistencies are logged)
//!
//! Renaming stays in the ordered phase: policies may hand out fresh names
//! from a counter, so the query order has to be fixed.

use tracing::debug;

use crate::features::nested_records::domain::{
    MergeOutcome, NestedIndex, NestedKind, NestedTypeRecord,
};
use crate::session::DecompileSession;
use crate::shared::models::{
    ClassContext, ClassUnit, ClassgraphError, LoadedClass, Result, UnitFailure,
};

/// Decoded records of one class, or the failure that aborted it
pub type DecodedUnit<'c> = std::result::Result<(&'c LoadedClass, Vec<NestedTypeRecord>), UnitFailure>;

/// Index plus the units whose attributes could not be decoded
#[derive(Debug, Default)]
pub struct NormalizeOutcome {
    pub index: NestedIndex,
    pub failures: Vec<UnitFailure>,
}

pub struct RecordNormalizer<'s> {
    session: &'s DecompileSession,
}

impl<'s> RecordNormalizer<'s> {
    pub fn new(session: &'s DecompileSession) -> Self {
        Self { session }
    }

    /// Decode every InnerClasses tuple of `class` into a record
    ///
    /// Simple names are left as declared. Self references are dropped here;
    /// everything else is kept in declaration order.
    pub fn decode_class(&self, class: &LoadedClass) -> Result<Vec<NestedTypeRecord>> {
        let pool = &class.constant_pool;
        let mut records = Vec::with_capacity(class.inner_classes.len());

        for (position, entry) in class.inner_classes.iter().enumerate() {
            let wrap = |e: ClassgraphError| {
                let message = format!("InnerClasses entry {}: {}", position, e.message);
                ClassgraphError::malformed(message)
                    .with_unit(class.name.to_string())
            };

            let inner_name = pool.class_name(entry.inner_class_index).map_err(wrap)?.clone();
            let outer_name = match entry.outer_class_index {
                0 => None,
                index => Some(pool.class_name(index).map_err(wrap)?.clone()),
            };
            let original_name = match entry.inner_name_index {
                0 => None,
                index => Some(pool.utf8(index).map_err(wrap)?.clone()),
            };

            let declared_kind = NestedKind::classify(outer_name.is_some(), original_name.is_some());
            let enclosing_name = outer_name.unwrap_or_else(|| class.name.clone());

            let record = NestedTypeRecord {
                inner_name,
                simple_name: original_name,
                declared_kind,
                access: entry.access_flags,
                enclosing_name,
            };

            if record.is_self_reference() {
                continue;
            }
            records.push(record);
        }

        Ok(records)
    }

    /// Fold one class's decoded records into `index`
    pub fn merge_class(
        &self,
        index: &mut NestedIndex,
        context: &ClassContext,
        class: &LoadedClass,
        records: &[NestedTypeRecord],
    ) {
        for record in records {
            if !context.is_own(&record.enclosing_name) {
                self.session.warn(&format!(
                    "Enclosing class {} of nested class {} is not part of the input set, entry ignored",
                    record.enclosing_name, record.inner_name
                ));
                continue;
            }

            let record = self.renamed(record);
            let record = &record;
            match index.merge_record(record) {
                MergeOutcome::Inserted => self.check_enclosing_method(context, record),
                MergeOutcome::Duplicate => {}
                MergeOutcome::Conflict => {
                    self.session.warn(&format!(
                        "Inconsistent inner class entries for {}!",
                        record.inner_name
                    ));
                }
            }

            index.add_edge(&record.enclosing_name, &record.inner_name);
            index.add_declared(&class.name, &record.inner_name);
        }
    }

    fn renamed(&self, record: &NestedTypeRecord) -> NestedTypeRecord {
        let simple_name = record
            .simple_name
            .as_ref()
            .map(|name| self.session.resolve_simple_name(&record.inner_name, name));
        NestedTypeRecord {
            simple_name,
            ..record.clone()
        }
    }

    /// Local and anonymous classes name their enclosing class twice; warn
    /// when InnerClasses and EnclosingMethod disagree
    fn check_enclosing_method(&self, context: &ClassContext, record: &NestedTypeRecord) {
        if record.declared_kind == NestedKind::Member {
            return;
        }
        let Some(nested) = context.get(&record.inner_name) else {
            return;
        };
        if let Some(method) = &nested.enclosing_method {
            if method.class_name != record.enclosing_name {
                self.session.warn(&format!(
                    "Nested class {} declared in {} but its EnclosingMethod names {}",
                    record.inner_name, record.enclosing_name, method.class_name
                ));
            }
        }
    }

    /// Decode and merge every own class sequentially
    ///
    /// A class whose tuples cannot be decoded is reported as a failure and
    /// contributes nothing to the index; corrupted units are reported too.
    pub fn normalize(&self, context: &ClassContext) -> NormalizeOutcome {
        let decoded: Vec<_> = context
            .units()
            .iter()
            .filter_map(|unit| self.decode_unit(unit))
            .collect();
        self.merge_all(context, decoded)
    }

    /// Decode a single unit; `None` for units that take no part (library
    /// classes)
    pub fn decode_unit<'c>(
        &self,
        unit: &'c ClassUnit,
    ) -> Option<DecodedUnit<'c>> {
        match unit {
            ClassUnit::Loaded(class) if class.own => Some(
                self.decode_class(class)
                    .map(|records| (class, records))
                    .map_err(|error| UnitFailure::new(class.name.clone(), error)),
            ),
            ClassUnit::Loaded(_) => None,
            ClassUnit::Corrupted { name, reason } => Some(Err(UnitFailure::new(
                name.clone(),
                ClassgraphError::corrupted(format!(
                    "Corrupted class file: {}",
                    reason
                ))
                .with_unit(name.to_string()),
            ))),
        }
    }

    /// Merge decode results (already in registration order) into an index
    pub fn merge_all<'c>(
        &self,
        context: &ClassContext,
        decoded: Vec<DecodedUnit<'c>>,
    ) -> NormalizeOutcome {
        let mut outcome = NormalizeOutcome::default();

        for result in decoded {
            match result {
                Ok((class, records)) => {
                    self.merge_class(&mut outcome.index, context, class, &records)
                }
                Err(failure) => {
                    self.session.error(&failure.error.to_string());
                    outcome.failures.push(failure);
                }
            }
        }

        debug!(
            "normalized {} nested records ({} failed units)",
            outcome.index.len(),
            outcome.failures.len()
        );
        outcome
    }
}

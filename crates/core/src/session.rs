//! Drives cursor sources through classify, validate and insert.

use crate::classify::Classifier;
use crate::config::{CollisionPolicy, IndexConfig};
use crate::error::{Result, XrefError};
use crate::index::{GlobalIndex, InsertOutcome, SharedIndex};
use crate::model::{FilePool, Occurrence};
use crate::output::RecordWriter;
use crate::validate::Validator;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};
use xrefscope_api::models::Specifier;
use xrefscope_plugin::{CursorConvention, CursorSource, RawCursorRecord, TableConvention};

/// Unit name recorded for collisions raised through [`IndexSession::index_record`].
pub const RECORD_UNIT: &str = "<record>";

/// A name offered under a second specifier, recorded under
/// [`CollisionPolicy::Report`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub unit: String,
    pub name: String,
    pub bound: Specifier,
    pub offered: Specifier,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: `{}` is a {} but was offered as a {}",
            self.unit, self.name, self.bound, self.offered
        )
    }
}

/// Per-unit counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnitReport {
    pub unit: String,
    pub cursors: usize,
    pub skipped: usize,
    pub adopted: usize,
    pub discarded: usize,
    pub collisions: usize,
}

impl UnitReport {
    fn new(unit: &str) -> Self {
        Self {
            unit: unit.to_string(),
            ..Self::default()
        }
    }

    fn count(&mut self, outcome: Admitted) {
        match outcome {
            Admitted::Skipped => self.skipped += 1,
            Admitted::Inserted(InsertOutcome::Adopted) => self.adopted += 1,
            Admitted::Inserted(InsertOutcome::Discarded) => self.discarded += 1,
            Admitted::Collided => self.collisions += 1,
        }
    }
}

enum Admitted {
    Skipped,
    Inserted(InsertOutcome),
    Collided,
}

/// One indexing run.
///
/// Records are classified, validated and inserted one at a time. Anonymous
/// names are unique within the session only.
pub struct IndexSession {
    config: IndexConfig,
    convention: Arc<dyn CursorConvention>,
    validator: Validator,
    files: FilePool,
    index: GlobalIndex,
    collisions: Vec<Collision>,
    units: usize,
}

impl IndexSession {
    pub fn new(config: IndexConfig, convention: Arc<dyn CursorConvention>) -> Self {
        tracing::debug!(
            "starting index session with convention {} ({:?} collisions)",
            convention.name(),
            config.collisions
        );
        Self {
            validator: config.validator(),
            config,
            convention,
            files: FilePool::new(),
            index: GlobalIndex::new(),
            collisions: Vec::new(),
            units: 0,
        }
    }

    /// Session over the C-family cursor preset.
    pub fn c_family(config: IndexConfig) -> Self {
        Self::new(config, Arc::new(TableConvention::c_family()))
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn index(&self) -> &GlobalIndex {
        &self.index
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Index a single raw record. `Ok(None)` when the record was skipped,
    /// either as a classification miss or as a reported collision.
    pub fn index_record(&mut self, raw: &RawCursorRecord) -> Result<Option<InsertOutcome>> {
        match self.admit(RECORD_UNIT, raw)? {
            Admitted::Inserted(outcome) => Ok(Some(outcome)),
            Admitted::Skipped | Admitted::Collided => Ok(None),
        }
    }

    pub fn index_unit<S: CursorSource + ?Sized>(&mut self, source: &mut S) -> Result<UnitReport> {
        let unit = source.unit_name().to_string();
        tracing::debug!("indexing unit {}", unit);

        let mut report = UnitReport::new(&unit);
        while let Some(raw) = next_record(source, &unit)? {
            report.cursors += 1;
            let admitted = self.admit(&unit, &raw)?;
            report.count(admitted);
        }

        self.units += 1;
        log_unit(&report);
        Ok(report)
    }

    /// Index independent units on the rayon pool.
    ///
    /// The result is identical to indexing the same units serially except
    /// for entity order, which is sorted by name afterwards.
    pub fn index_parallel<S: CursorSource>(&mut self, units: Vec<S>) -> Result<Vec<UnitReport>> {
        let count = units.len();
        tracing::debug!("indexing {} units in parallel", count);

        let shared = SharedIndex::from(std::mem::take(&mut self.index));
        let collisions = Mutex::new(Vec::new());
        let convention = self.convention.as_ref();
        let positions = self.config.positions;
        let policy = self.config.collisions;
        let validator = &self.validator;
        let files = &self.files;

        let reports: Result<Vec<UnitReport>> = units
            .into_par_iter()
            .map(|mut source| -> Result<UnitReport> {
                let unit = source.unit_name().to_string();
                let classifier = Classifier::new(convention, positions, files, shared.anonymous());
                let mut report = UnitReport::new(&unit);
                while let Some(raw) = next_record(&mut source, &unit)? {
                    report.cursors += 1;
                    let Some(occurrence) = classifier.classify(&raw) else {
                        report.count(Admitted::Skipped);
                        continue;
                    };
                    validator.check(&occurrence)?;
                    let admitted = settle(shared.insert(occurrence), policy, &unit, |c| {
                        collisions
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .push(c)
                    })?;
                    report.count(admitted);
                }
                log_unit(&report);
                Ok(report)
            })
            .collect();

        self.index = shared.into_global();
        self.collisions
            .extend(collisions.into_inner().unwrap_or_else(PoisonError::into_inner));
        let reports = reports?;
        self.units += count;
        Ok(reports)
    }

    /// Write the index in the configured format.
    pub fn emit<W: Write>(&self, out: W) -> Result<usize> {
        let mut writer = RecordWriter::new(out, self.config.output);
        writer.write_index(&self.index)
    }

    pub fn finish(self) -> GlobalIndex {
        let stats = self.index.stats();
        tracing::info!(
            "indexed {} units: {} entities, {} occurrences, {} duplicates discarded, {} collisions",
            self.units,
            self.index.entity_count(),
            stats.adopted,
            stats.discarded,
            self.collisions.len()
        );
        self.index
    }

    fn admit(&mut self, unit: &str, raw: &RawCursorRecord) -> Result<Admitted> {
        let occurrence = {
            let classifier = Classifier::new(
                self.convention.as_ref(),
                self.config.positions,
                &self.files,
                self.index.anonymous(),
            );
            match classifier.classify(raw) {
                Some(occurrence) => occurrence,
                None => return Ok(Admitted::Skipped),
            }
        };
        self.validator.check(&occurrence)?;
        self.insert(unit, occurrence)
    }

    fn insert(&mut self, unit: &str, occurrence: Occurrence) -> Result<Admitted> {
        let result = self.index.insert(occurrence);
        let collisions = &mut self.collisions;
        settle(result, self.config.collisions, unit, |c| collisions.push(c))
    }
}

fn next_record<S: CursorSource + ?Sized>(
    source: &mut S,
    unit: &str,
) -> Result<Option<RawCursorRecord>> {
    match source.next_cursor() {
        None => Ok(None),
        Some(Ok(raw)) => Ok(Some(raw)),
        Some(Err(e)) => Err(XrefError::Parser {
            unit: unit.to_string(),
            message: e.to_string(),
        }),
    }
}

/// Apply the collision policy to an insert result.
fn settle(
    result: Result<InsertOutcome>,
    policy: CollisionPolicy,
    unit: &str,
    record: impl FnOnce(Collision),
) -> Result<Admitted> {
    match result {
        Ok(outcome) => Ok(Admitted::Inserted(outcome)),
        Err(XrefError::SpecifierCollision {
            name,
            bound,
            offered,
        }) if policy == CollisionPolicy::Report => {
            let collision = Collision {
                unit: unit.to_string(),
                name,
                bound,
                offered,
            };
            tracing::warn!("specifier collision in {}", collision);
            record(collision);
            Ok(Admitted::Collided)
        }
        Err(e) => Err(e),
    }
}

fn log_unit(report: &UnitReport) {
    tracing::debug!(
        "unit {}: {} cursors, {} skipped, {} adopted, {} discarded, {} collisions",
        report.unit,
        report.cursors,
        report.skipped,
        report.adopted,
        report.discarded,
        report.collisions
    );
}

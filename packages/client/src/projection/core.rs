//! Projector: rebuilds a document from a manifest's matches

use serde_json::{Map, Value};

use super::stats::ProjectionStats;
use super::walk::Walk;
use crate::config::ProjectorConfig;
use crate::error::{ProjectionError, ProjectionResult, RuleFailure};
use crate::jsonpath::{PathError, TargetPath};
use crate::manifest::Manifest;

/// Output of [`Projector::project`]
///
/// Holds the document built from every rule that applied, plus the rules
/// that could not be applied.
#[derive(Debug, Clone)]
pub struct Projection {
    document: Value,
    failures: Vec<RuleFailure>,
    stats: ProjectionStats,
}

impl Projection {
    #[inline]
    #[must_use]
    pub fn document(&self) -> &Value {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> Value {
        self.document
    }

    #[inline]
    #[must_use]
    pub fn failures(&self) -> &[RuleFailure] {
        &self.failures
    }

    /// True when every matched rule was applied
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn stats(&self) -> &ProjectionStats {
        &self.stats
    }

    #[must_use]
    pub fn into_parts(self) -> (Value, Vec<RuleFailure>) {
        (self.document, self.failures)
    }

    /// The document, or the first rule failure
    ///
    /// # Errors
    ///
    /// Returns the error of the first failed rule, if any.
    pub fn into_result(self) -> ProjectionResult<Value> {
        match self.failures.into_iter().next() {
            Some(failure) => Err(failure.error),
            None => Ok(self.document),
        }
    }
}

/// Rebuilds documents from `(target, value)` pairs
#[derive(Debug, Clone, Default)]
pub struct Projector {
    config: ProjectorConfig,
}

impl Projector {
    #[must_use]
    pub fn new(config: ProjectorConfig) -> Self {
        Self { config }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    /// Project `manifest` into a new document
    ///
    /// Plain targets are inserted first, in rule order; targets carrying a
    /// query are inserted afterwards, in rule order, so their conditions
    /// are tested against everything the plain rules produced.
    ///
    /// # Errors
    ///
    /// Only with `fail_fast` set: the first rule failure. Otherwise failures
    /// are collected on the returned [`Projection`].
    pub fn project(&self, manifest: &Manifest) -> ProjectionResult<Projection> {
        let mut stats = ProjectionStats::new(manifest.rules().len());
        let mut failures = Vec::new();
        let mut record = Value::Object(Map::new());
        let mut deferred = Vec::new();

        for (target, value) in manifest {
            stats.record_match();
            let path = match TargetPath::parse(target) {
                Ok(path) => path,
                Err(error) => {
                    self.reject(target, error.into(), &mut failures, &mut stats)?;
                    continue;
                }
            };

            if path.has_query() {
                deferred.push((target, path, value));
                continue;
            }

            match self.walk(&path, target).insert(value, &mut record) {
                Ok(_) => stats.record_plain(),
                Err(error) => self.reject(target, error, &mut failures, &mut stats)?,
            }
        }

        log::debug!("applying {} deferred query rule(s)", deferred.len());
        for (target, path, value) in deferred {
            match self.walk(&path, target).insert(value, &mut record) {
                Ok(_) => stats.record_query(),
                Err(error) => self.reject(target, error, &mut failures, &mut stats)?,
            }
        }

        stats.record_unmatched(manifest.unmatched().count());
        stats.finish();
        log::debug!(
            "projection done: {} matched, {} unmatched, {} failed in {:?}",
            stats.matched,
            stats.unmatched,
            stats.failures,
            stats.duration()
        );

        Ok(Projection {
            document: record,
            failures,
            stats,
        })
    }

    /// Insert `value` at a target without queries
    ///
    /// # Errors
    ///
    /// `Path` for a malformed target, a target carrying a query, or an index
    /// above the limit; `Conflict` when the record's shape blocks the walk.
    pub fn insert_value(&self, target: &str, value: Value, record: &mut Value) -> ProjectionResult<()> {
        let path = TargetPath::parse(target)?;
        if path.has_query() {
            return Err(PathError::invalid_query(
                target,
                "query segments are only applied by query insertion",
            )
            .into());
        }
        self.walk(&path, target).insert(&value, record).map(|_| ())
    }

    /// Insert `value` at any target, resolving queries against `record`
    ///
    /// # Errors
    ///
    /// As [`Projector::insert_value`], without the query restriction.
    pub fn insert_query(&self, target: &str, value: Value, record: &mut Value) -> ProjectionResult<()> {
        let path = TargetPath::parse(target)?;
        self.walk(&path, target).insert(&value, record).map(|_| ())
    }

    /// Rebuild a document from flattened `(path, value)` pairs
    ///
    /// # Errors
    ///
    /// The first path that cannot be inserted.
    pub fn rebuild<I>(&self, flat: I) -> ProjectionResult<Value>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut record = Value::Object(Map::new());
        for (path, value) in flat {
            self.insert_value(&path, value, &mut record)?;
        }
        Ok(record)
    }

    fn walk<'p>(&self, path: &'p TargetPath, target: &'p str) -> Walk<'p> {
        Walk {
            path,
            target,
            max_index: self.config.max_index,
        }
    }

    fn reject(
        &self,
        target: &str,
        error: ProjectionError,
        failures: &mut Vec<RuleFailure>,
        stats: &mut ProjectionStats,
    ) -> ProjectionResult<()> {
        stats.record_failure();
        if self.config.fail_fast {
            return Err(error);
        }
        log::warn!("rule for target {target} skipped: {error}");
        failures.push(RuleFailure::new(target, error));
        Ok(())
    }
}

/// [`Projector::insert_value`] with the default configuration
///
/// # Errors
///
/// See [`Projector::insert_value`].
pub fn insert_value(path: &str, value: Value, record: &mut Value) -> ProjectionResult<()> {
    Projector::default().insert_value(path, value, record)
}

/// [`Projector::insert_query`] with the default configuration
///
/// # Errors
///
/// See [`Projector::insert_query`].
pub fn insert_query(path: &str, value: Value, record: &mut Value) -> ProjectionResult<()> {
    Projector::default().insert_query(path, value, record)
}

/// [`Projector::project`] with the default configuration
///
/// # Errors
///
/// Never with the default configuration; kept fallible for symmetry with
/// [`Projector::project`].
pub fn project(manifest: &Manifest) -> ProjectionResult<Projection> {
    Projector::default().project(manifest)
}

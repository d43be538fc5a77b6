//! Named rule sets

use std::collections::BTreeMap;

use crate::config::{ResourceConfig, Validator};
use crate::error::ProjectionResult;
use crate::manifest::Rule;

use super::loader;

/// Rule sets keyed by resource name, iterated in name order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceStore {
    sets: BTreeMap<String, Vec<Rule>>,
}

impl ResourceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every resource under `config.root`
    ///
    /// # Errors
    ///
    /// `Config` for an invalid configuration, `Resource` when the root
    /// cannot be listed. Individual bad resources are not errors.
    pub fn load(config: &ResourceConfig) -> ProjectionResult<Self> {
        config.validate()?;
        let store: Self = loader::load_dir(config)?.into_iter().collect();
        tracing::debug!(
            root = %config.root.display(),
            resources = store.len(),
            "resource store loaded"
        );
        Ok(store)
    }

    /// In-memory store from `(name, rules)` pairs
    pub fn from_rule_sets<I, N>(sets: I) -> Self
    where
        I: IntoIterator<Item = (N, Vec<Rule>)>,
        N: Into<String>,
    {
        sets.into_iter()
            .map(|(name, rules)| (name.into(), rules))
            .collect()
    }

    /// Add or replace a rule set
    pub fn insert(&mut self, name: impl Into<String>, rules: Vec<Rule>) -> Option<Vec<Rule>> {
        self.sets.insert(name.into(), rules)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[Rule]> {
        self.sets.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.sets.iter().map(|(name, rules)| (name.as_str(), rules.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl FromIterator<(String, Vec<Rule>)> for ResourceStore {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Rule>)>>(iter: I) -> Self {
        Self {
            sets: iter.into_iter().collect(),
        }
    }
}

//! Manifest: a document paired with the rules applied to it

use serde_json::{Map, Value};

use super::flat_map::FlatMap;
use super::rule::Rule;

/// Source document, rules and the flattened view derived from them
///
/// Iterating a manifest yields `(target, value)` for every rule whose
/// `source` equals a flattened path of the document, in rule order. Rules
/// with no matching path contribute nothing.
#[derive(Debug, Clone)]
pub struct Manifest {
    data: Value,
    rules: Vec<Rule>,
    flat: FlatMap,
}

impl Manifest {
    /// Flatten `data` once and keep it for the manifest's lifetime
    #[must_use]
    pub fn new(data: Value, rules: Vec<Rule>) -> Self {
        let flat = FlatMap::from_document(&data);
        log::debug!(
            "manifest built: {} flattened paths, {} rules",
            flat.len(),
            rules.len()
        );
        Self { data, rules, flat }
    }

    #[inline]
    #[must_use]
    pub fn data(&self) -> &Value {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[inline]
    #[must_use]
    pub fn flat(&self) -> &FlatMap {
        &self.flat
    }

    /// Matched `(target, value)` pairs in rule order
    #[must_use]
    pub fn iter(&self) -> Matches<'_> {
        Matches {
            rules: self.rules.iter(),
            flat: &self.flat,
        }
    }

    /// Rules whose source path does not occur in the document
    pub fn unmatched(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|rule| !self.flat.contains(&rule.source))
    }

    /// `target -> value` for every match; a later rule with the same target wins
    #[must_use]
    pub fn items(&self) -> Map<String, Value> {
        self.iter()
            .map(|(target, value)| (target.to_string(), value.clone()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = (&'a str, &'a Value);
    type IntoIter = Matches<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a manifest's matches
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    rules: std::slice::Iter<'a, Rule>,
    flat: &'a FlatMap,
}

impl<'a> Iterator for Matches<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        for rule in self.rules.by_ref() {
            match self.flat.get(&rule.source) {
                Some(value) => {
                    log::debug!("rule matched: {} -> {}", rule.source, rule.target);
                    return Some((rule.target.as_str(), value));
                }
                None => log::debug!("rule unmatched: {}", rule.source),
            }
        }
        None
    }
}

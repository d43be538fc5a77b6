//! Builder configuration and execution methods

use projson_client::config::Validator;
use projson_client::{
    Manifest, Projection, ProjectionError, ProjectionResult, Projector, ProjectorConfig, Rule,
};
use serde_json::Value;

use super::core::ProjectionBuilder;

impl ProjectionBuilder {
    /// Append one rule
    #[must_use]
    pub fn rule(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.rules.push(Rule::new(source, target));
        self
    }

    /// Append rules in order
    #[must_use]
    pub fn rules<I, R>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Rule>,
    {
        self.rules.extend(rules.into_iter().map(Into::into));
        self
    }

    /// Append rules from a JSON array of `{source, target}` records
    ///
    /// # Errors
    ///
    /// Returns `Resource` when `text` is not an array of rule records.
    pub fn rules_json(self, text: &str) -> ProjectionResult<Self> {
        let rules: Vec<Rule> = serde_json::from_str(text)
            .map_err(|e| ProjectionError::resource("inline", e.to_string()))?;
        Ok(self.rules(rules))
    }

    #[must_use]
    pub fn max_index(mut self, max_index: usize) -> Self {
        self.config.max_index = max_index;
        self
    }

    #[must_use]
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.config.fail_fast = fail_fast;
        self
    }

    #[must_use]
    pub fn config(mut self, config: ProjectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the settings and produce a projector
    ///
    /// # Errors
    ///
    /// Returns `Config` when the projector settings are invalid.
    pub fn build(&self) -> ProjectionResult<Projector> {
        self.config.validate()?;
        Ok(Projector::new(self.config.clone()))
    }

    /// Pair `document` with the collected rules
    #[must_use]
    pub fn manifest(&self, document: &Value) -> Manifest {
        Manifest::new(document.clone(), self.rules.clone())
    }

    /// Project `document`, collecting rule failures
    ///
    /// # Errors
    ///
    /// `Config` for invalid settings; with `fail_fast`, the first rule failure.
    pub fn project(&self, document: &Value) -> ProjectionResult<Projection> {
        let projector = self.build()?;
        let projection = projector.project(&self.manifest(document))?;
        log::debug!(
            "projected {} rule(s) with {} failure(s)",
            self.rules.len(),
            projection.failures().len()
        );
        Ok(projection)
    }

    /// Project `document` and require every matched rule to apply
    ///
    /// # Errors
    ///
    /// As [`ProjectionBuilder::project`], plus the first collected rule failure.
    pub fn project_document(&self, document: &Value) -> ProjectionResult<Value> {
        self.project(document)?.into_result()
    }
}

//! Core `ProjectionBuilder` structure

use std::fmt;

use projson_client::{ProjectorConfig, Rule};

/// Collects rules and projector settings, then projects documents
///
/// A builder can be reused: every projection gets a fresh manifest and
/// output document.
#[derive(Clone, Default, PartialEq)]
pub struct ProjectionBuilder {
    pub(crate) rules: Vec<Rule>,
    pub(crate) config: ProjectorConfig,
}

impl ProjectionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules added so far, in application order
    #[must_use]
    pub fn rule_list(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn projector_config(&self) -> &ProjectorConfig {
        &self.config
    }
}

impl fmt::Debug for ProjectionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectionBuilder")
            .field("rules", &self.rules.len())
            .field("max_index", &self.config.max_index)
            .field("fail_fast", &self.config.fail_fast)
            .finish()
    }
}

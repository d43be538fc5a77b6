//! Projection rules

use serde::{Deserialize, Serialize};

/// Relocate the value at `source` (a flattened path) to `target`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    pub source: String,
    pub target: String,
}

impl Rule {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl<S: Into<String>, T: Into<String>> From<(S, T)> for Rule {
    fn from((source, target): (S, T)) -> Self {
        Rule::new(source, target)
    }
}

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::config::ConfigurationError;
use crate::jsonpath::PathError;

/// Result type for projection operations
pub type ProjectionResult<T> = std::result::Result<T, ProjectionError>;

/// Errors raised while projecting a document or serving a projection request
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProjectionError {
    /// Target path does not conform to the path grammar
    #[error(transparent)]
    Path(#[from] PathError),
    /// The walk met a value of the wrong shape, e.g. a scalar where an object is needed
    #[error("conflict at '{target}': {reason}")]
    Conflict { target: String, reason: String },
    /// A rule resource could not be loaded
    #[error("resource '{name}': {reason}")]
    Resource { name: String, reason: String },
    /// Malformed inbound event
    #[error("event error: {0}")]
    Event(String),
    #[error(transparent)]
    Config(#[from] ConfigurationError),
}

impl ProjectionError {
    pub fn conflict(target: impl Into<String>, reason: impl Into<String>) -> Self {
        ProjectionError::Conflict {
            target: target.into(),
            reason: reason.into(),
        }
    }

    pub fn resource(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ProjectionError::Resource {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn event(reason: impl Into<String>) -> Self {
        ProjectionError::Event(reason.into())
    }

    /// True for failures caused by a rule's target path rather than its value
    #[must_use]
    pub fn is_path(&self) -> bool {
        matches!(self, ProjectionError::Path(_))
    }
}

/// A rule that could not be applied, kept alongside the partial projection
#[derive(Debug, Clone, PartialEq)]
pub struct RuleFailure {
    pub target: String,
    pub error: ProjectionError,
}

impl RuleFailure {
    #[must_use]
    pub fn new(target: impl Into<String>, error: ProjectionError) -> Self {
        Self {
            target: target.into(),
            error,
        }
    }
}

impl Serialize for RuleFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RuleFailure", 2)?;
        state.serialize_field("target", &self.target)?;
        state.serialize_field("error", &self.error.to_string())?;
        state.end()
    }
}

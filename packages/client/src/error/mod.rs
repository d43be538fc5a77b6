//! Projection errors
//!
//! [`ProjectionError`] covers everything a projection, a resource load or an
//! event can fail with; [`RuleFailure`] pairs one with the rule target it hit.

pub mod types;

pub use types::{ProjectionError, ProjectionResult, RuleFailure};

//! projson public API
//!
//! Project JSON documents through declarative `{source, target}` rules.
//! The engine lives in `projson_client`; this crate re-exports it and adds a
//! fluent builder.
//!
//! ```rust
//! use projson::Projson;
//! use serde_json::json;
//!
//! let document = Projson::builder()
//!     .rule("$.loan.id", "$.report.id")
//!     .rule("$.loan.fee", "$.report.fees[?(@.type=='late')].amount")
//!     .project_document(&json!({"loan": {"id": "L-1", "fee": 25}}))
//!     .unwrap();
//!
//! assert_eq!(
//!     document,
//!     json!({"report": {"id": "L-1", "fees": [{"type": "late", "amount": 25}]}})
//! );
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;

use serde_json::Value;

pub use builder::ProjectionBuilder;
// Re-export important types from client package
pub use projson_client::{
    Config, EventHandler, FlatMap, HandlerResponse, Manifest, PathError, Projection,
    ProjectionError, ProjectionResult, ProjectionStats, Projector, ProjectorConfig, Report,
    ResourceConfig, ResourceStore, Rule, RuleFailure, TargetPath, generate_event, insert_query,
    insert_value,
};
pub use projson_client::{jsonpath, manifest, projection};

/// Main entry point providing static builder methods
pub struct Projson;

impl Projson {
    /// Start an empty projection builder
    #[must_use]
    pub fn builder() -> ProjectionBuilder {
        ProjectionBuilder::new()
    }

    /// Start a builder seeded with `rules`
    pub fn rules<I, R>(rules: I) -> ProjectionBuilder
    where
        I: IntoIterator<Item = R>,
        R: Into<Rule>,
    {
        ProjectionBuilder::new().rules(rules)
    }
}

/// Flatten `document`, match `rules` against it and project the matches
///
/// Rule failures are collected on the returned [`Projection`].
///
/// # Errors
///
/// Never with the default configuration.
pub fn flatten_and_match(document: &Value, rules: &[Rule]) -> ProjectionResult<Projection> {
    let manifest = Manifest::new(document.clone(), rules.to_vec());
    Projector::default().project(&manifest)
}

/// The flattened `path -> scalar` view of `document`
#[must_use]
pub fn flatten(document: &Value) -> FlatMap {
    FlatMap::from_document(document)
}

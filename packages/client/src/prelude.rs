//! projson prelude
//!
//! The types most callers need: rules, manifests, the projector and its errors.

pub use crate::config::{Config, ProjectorConfig, ResourceConfig, Validator};
pub use crate::error::{ProjectionError, ProjectionResult, RuleFailure};
pub use crate::handler::{EventHandler, HandlerResponse, Report, generate_event};
pub use crate::jsonpath::{PathError, Segment, TargetPath, parse_path};
pub use crate::manifest::{FlatMap, Manifest, Rule, flatten};
pub use crate::projection::{Projection, ProjectionStats, Projector, insert_query, insert_value, project};
pub use crate::resources::ResourceStore;

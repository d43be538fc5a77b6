//! # projson client
//!
//! Rule-driven JSON-to-JSON projection engine. A source document is
//! flattened into canonical paths, each `{source, target}` rule picks the
//! value at its `source`, and the projector writes it at `target` in a new
//! document, growing arrays by index or placing values into array elements
//! selected by equality filters.
//!
//! ## Pipeline
//!
//! - [`manifest::flatten`] turns a document into `($.path, scalar)` pairs
//! - [`Manifest`] pairs the flattened document with the rules
//! - [`jsonpath::parse_path`] parses target paths
//! - [`Projector`] rebuilds the output, plain targets before query targets
//!
//! ## Usage
//!
//! ```rust
//! use projson_client::{Manifest, Projector, Rule};
//! use serde_json::json;
//!
//! let manifest = Manifest::new(
//!     json!({"loan": {"id": "L-1", "late_fee": 25}}),
//!     vec![
//!         Rule::new("$.loan.id", "$.report.loan"),
//!         Rule::new("$.loan.late_fee", "$.report.fees[?(@.type=='late')].amount"),
//!     ],
//! );
//!
//! let projection = Projector::default().project(&manifest).unwrap();
//! assert_eq!(
//!     projection.document(),
//!     &json!({"report": {"loan": "L-1", "fees": [{"type": "late", "amount": 25}]}})
//! );
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod config;
pub mod error;
pub mod handler;
pub mod jsonpath;
pub mod manifest;
pub mod projection;
pub mod resources;

// Prelude with canonical types
pub mod prelude;

pub use crate::prelude::*;

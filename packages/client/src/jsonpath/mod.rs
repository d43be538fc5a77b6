//! Target path grammar
//!
//! A restricted JSONPath dialect for addressing where a projected value is
//! written. Paths are dotted keys with optional bracket qualifiers:
//!
//! - `$.loan.amount` plain object descent
//! - `$.items[3].name` literal array index, padding with empty objects
//! - `$.fees[?(@.type=='late')].amount` every element matching the query
//! - `$.fees[?(@.type=='late')][1].amount` the second matching element
//! - `$.grid[0][2]` further indices descend into nested arrays
//!
//! Wildcards, slices, recursive descent and filters other than `==`
//! conjunctions are not part of the grammar.
//!
//! # Examples
//!
//! ```rust
//! use projson_client::jsonpath::TargetPath;
//!
//! let path: TargetPath = "$.fees[?(@.type=='late')][0].amount".parse().unwrap();
//! assert!(path.has_query());
//! assert_eq!(path.segments()[0].index(), Some(0));
//! ```

pub mod error;
mod grammar;
pub mod parser;
pub mod query;
pub mod segment;

pub use self::{
    error::{ErrorKind, PathError, PathResult},
    parser::parse_path,
    query::{Condition, Query},
    segment::{Segment, TargetPath},
};

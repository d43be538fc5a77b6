//! Target path error handling
//!
//! Error types for the target path grammar. Every failure carries the
//! offending path so it can be reported per rule.

mod types;

pub use types::{ErrorKind, PathError, PathResult};

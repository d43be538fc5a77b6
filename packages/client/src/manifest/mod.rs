//! Flattening and rule matching
//!
//! A [`Manifest`] wraps a source document and a rule list. The document is
//! flattened once into a [`FlatMap`] of canonical paths such as
//! `$.loan.fees[0].amount`, and each rule's `source` is looked up in it by
//! exact string equality.

mod core;
pub mod flat_map;
pub mod flatten;
pub mod rule;

pub use self::{
    core::{Manifest, Matches},
    flat_map::FlatMap,
    flatten::{Flatten, ROOT, flatten},
    rule::Rule,
};

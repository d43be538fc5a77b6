//! Document reconstruction
//!
//! Turns a manifest's `(target, value)` matches back into a nested
//! document. Insertion runs in two phases: plain targets first, then
//! targets with filter queries, so a query always sees the data placed by
//! plain rules regardless of rule order.

mod core;
pub mod stats;
mod walk;

pub use self::{
    core::{Projection, Projector, insert_query, insert_value, project},
    stats::ProjectionStats,
};

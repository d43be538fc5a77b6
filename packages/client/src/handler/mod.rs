//! Event entry point
//!
//! Extracts the JSON payload of each record in an inbound event and
//! projects it through every rule set in a [`ResourceStore`](crate::resources::ResourceStore).

mod core;
pub mod event;

pub use self::{
    core::{EventHandler, HandlerResponse, Report},
    event::{Event, EventRecord, generate_event},
};

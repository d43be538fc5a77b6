//! Fluent projection builder

pub mod core;
pub mod methods;

pub use self::core::ProjectionBuilder;

//! Rule resource loading
//!
//! Rule sets are read from a directory tree once and looked up by name.
//! A resource that fails to parse is logged and loads as an empty rule set.

mod loader;
mod store;

pub use store::ResourceStore;

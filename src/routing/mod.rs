//! Routing module
//!
//! Path-to-endpoint matching for the catalog API.

mod matcher;

pub use matcher::Route;

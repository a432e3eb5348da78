//! Catalog domain
//!
//! Record types, startup data and the shared store the HTTP handlers read
//! from and reserve against.

mod error;
mod model;
mod seed;
mod store;

pub use error::CatalogError;
pub use model::{Category, Product};
pub use store::CatalogStore;

use thiserror::Error;

/// Failures a catalog operation can report to the caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { available: u32, requested: i128 },
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i128),
}

//! Catalog record types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A sellable item. Only `stock` changes after startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Category id by convention; never checked against the category list
    pub category: String,
    pub stock: u32,
    pub created_at: String,
}

impl Product {
    /// Case-insensitive category comparison used by the list filter
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Stock view returned by the stock check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub product_id: String,
    pub stock: u32,
    pub available: bool,
}

/// Outcome of a successful reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub product_id: String,
    pub reserved: u32,
    pub remaining_stock: u32,
}

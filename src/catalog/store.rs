//! In-memory catalog store
//!
//! Products live behind a single `RwLock`. Reads clone out of a read guard;
//! `reserve` holds the write guard for the whole lookup, check and decrement
//! so two concurrent reservations can never both pass the stock check.

use tokio::sync::RwLock;

use super::error::CatalogError;
use super::model::{Category, Product, Reservation, StockLevel};
use super::seed;

pub struct CatalogStore {
    products: RwLock<Vec<Product>>,
    categories: Vec<Category>,
}

impl CatalogStore {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products: RwLock::new(products),
            categories,
        }
    }

    /// Store populated with the startup catalog
    pub fn seeded() -> Self {
        Self::new(seed::products(), seed::categories())
    }

    /// All products, or those whose category matches `category` ignoring case.
    /// An empty filter matches everything.
    pub async fn list_products(&self, category: Option<&str>) -> Vec<Product> {
        let products = self.products.read().await;
        match category.filter(|c| !c.is_empty()) {
            Some(category) => products
                .iter()
                .filter(|p| p.in_category(category))
                .cloned()
                .collect(),
            None => products.clone(),
        }
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, CatalogError> {
        let products = self.products.read().await;
        products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub fn list_categories(&self) -> &[Category] {
        &self.categories
    }

    pub async fn check_stock(&self, id: &str) -> Result<StockLevel, CatalogError> {
        let products = self.products.read().await;
        let product = products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        Ok(StockLevel {
            product_id: product.id.clone(),
            stock: product.stock,
            available: product.stock > 0,
        })
    }

    /// Take `quantity` units out of a product's stock.
    ///
    /// Stock is only written once every check has passed, so a failed
    /// reservation leaves the product untouched.
    pub async fn reserve(&self, id: &str, quantity: i128) -> Result<Reservation, CatalogError> {
        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        if quantity < 0 {
            return Err(CatalogError::InvalidQuantity(quantity));
        }

        let reserved = match u32::try_from(quantity) {
            Ok(q) if q <= product.stock => q,
            _ => {
                return Err(CatalogError::InsufficientStock {
                    available: product.stock,
                    requested: quantity,
                })
            }
        };

        product.stock -= reserved;

        Ok(Reservation {
            product_id: product.id.clone(),
            reserved,
            remaining_stock: product.stock,
        })
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::seeded()
    }
}

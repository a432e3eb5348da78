// API types module
// JSON bodies returned by the catalog routes

use serde::Serialize;

use crate::catalog::{Category, Product};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    pub timestamp: String,
    /// Seconds since startup
    pub uptime: f64,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub success: bool,
    pub data: Vec<Product>,
    pub count: usize,
    /// Filter as received, `null` when absent
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryListResponse<'a> {
    pub success: bool,
    pub data: &'a [Category],
    pub count: usize,
}

/// `{success: true, data}` wrapper for single results
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse<T> {
    pub success: bool,
    pub message: &'static str,
    pub data: T,
}

/// Failure body; stock fields only appear for insufficient stock
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested: Option<i128>,
}

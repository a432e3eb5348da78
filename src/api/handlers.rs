// Catalog handlers module
// One function per route; failures are returned as `ApiError` for the router to render

use chrono::{SecondsFormat, Utc};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Response, StatusCode};
use serde_json::Value;

use super::error::ApiError;
use super::response::json_response;
use super::types::{
    CategoryListResponse, DataResponse, HealthResponse, MessageResponse, ProductListResponse,
};
use crate::config::AppState;
use crate::http::query_param;
use crate::logger;

type ApiResult = Result<Response<Full<Bytes>>, ApiError>;

/// Quantity reserved when the body does not name one
const DEFAULT_QUANTITY: i128 = 1;

pub fn health(state: &AppState) -> Response<Full<Bytes>> {
    let body = HealthResponse {
        status: "healthy",
        service: state.config.service.name.clone(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        uptime: state.uptime_secs(),
    };
    json_response(StatusCode::OK, &body)
}

pub async fn list_products(state: &AppState, query: Option<&str>) -> ApiResult {
    let category = query_param(query, "category");
    logger::log_catalog(&format!(
        "GET /products - fetching products (category: {})",
        category.as_deref().unwrap_or("none")
    ));

    let products = state.catalog.list_products(category.as_deref()).await;
    let body = ProductListResponse {
        success: true,
        count: products.len(),
        data: products,
        category,
    };
    Ok(json_response(StatusCode::OK, &body))
}

pub async fn get_product(state: &AppState, id: &str) -> ApiResult {
    logger::log_catalog(&format!("GET /products/{id} - fetching product by id"));
    let product = state.catalog.get_product(id).await?;
    Ok(json_response(StatusCode::OK, &DataResponse::ok(product)))
}

pub fn list_categories(state: &AppState) -> Response<Full<Bytes>> {
    logger::log_catalog("GET /categories - fetching all categories");
    let categories = state.catalog.list_categories();
    let body = CategoryListResponse {
        success: true,
        data: categories,
        count: categories.len(),
    };
    json_response(StatusCode::OK, &body)
}

pub async fn check_stock(state: &AppState, id: &str) -> ApiResult {
    logger::log_catalog(&format!("GET /products/{id}/stock - checking stock"));
    let level = state.catalog.check_stock(id).await?;
    Ok(json_response(StatusCode::OK, &DataResponse::ok(level)))
}

pub async fn reserve_stock<B>(state: &AppState, id: &str, body: B) -> ApiResult
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let bytes = read_body(body, state.config.http.max_body_size).await?;
    let quantity = parse_quantity(&bytes);
    logger::log_catalog(&format!(
        "POST /products/{id}/reserve - reserving {quantity} items"
    ));

    let reservation = state.catalog.reserve(id, quantity).await?;
    let body = MessageResponse {
        success: true,
        message: "Stock reserved successfully",
        data: reservation,
    };
    Ok(json_response(StatusCode::OK, &body))
}

/// Collect a request body up to `limit` bytes.
///
/// A body that fails to arrive is treated as empty; only the size limit is
/// reported to the client.
async fn read_body<B>(body: B, limit: u64) -> Result<Bytes, ApiError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let max = usize::try_from(limit).unwrap_or(usize::MAX);
    match Limited::new(body, max).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(ApiError::PayloadTooLarge { limit })
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            Ok(Bytes::new())
        }
    }
}

/// `quantity` from a reserve body.
///
/// Anything that is not a JSON object with an integer `quantity` falls back to
/// the default. Both signed and unsigned 64-bit integers are kept exactly.
pub fn parse_quantity(body: &[u8]) -> i128 {
    let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) else {
        return DEFAULT_QUANTITY;
    };
    match fields.get("quantity") {
        Some(Value::Number(n)) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .unwrap_or(DEFAULT_QUANTITY),
        _ => DEFAULT_QUANTITY,
    }
}

// API module entry
// Catalog HTTP surface: route dispatch, handlers and JSON envelopes

mod error;
mod handlers;
mod response;
mod types;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::Route;

use error::ApiError;
use response::error_response;

/// Main entry point for HTTP request handling
///
/// Every outcome becomes a response here: handler errors are rendered by
/// `error_response`, and a panicking handler becomes a 500.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body + Send + 'static,
    B::Data: Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let mut access_entry = state.access_log_enabled().then(|| {
        AccessLogEntry::from_request(peer, req.method(), req.uri(), req.version(), req.headers())
    });

    let mut response = if req.method() == Method::OPTIONS {
        http::build_options_response(state.config.http.enable_cors)
    } else {
        let task_state = Arc::clone(&state);
        match tokio::spawn(async move { dispatch(req, &task_state).await }).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(err)) => {
                if matches!(err, ApiError::Internal(_)) {
                    logger::log_error(&err.to_string());
                }
                error_response(&err)
            }
            Err(join_err) => {
                let err = ApiError::Internal(format!("request handler failed: {join_err}"));
                logger::log_error(&err.to_string());
                error_response(&err)
            }
        }
    };

    http::apply_common_headers(&mut response, &state.config.http);

    if let Some(entry) = access_entry.as_mut() {
        let body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.finish(response.status().as_u16(), body_bytes, started);
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

async fn dispatch<B>(req: Request<B>, state: &AppState) -> Result<Response<Full<Bytes>>, ApiError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let path = req.uri().path();
    let route = Route::resolve(path).ok_or_else(|| ApiError::EndpointNotFound(path.to_string()))?;

    if !route.accepts(req.method()) {
        return Err(ApiError::MethodNotAllowed {
            method: req.method().to_string(),
            allowed: route.allow(),
        });
    }

    // Owned so nothing borrowed from the request is held across an await
    let query = req.uri().query().map(str::to_owned);

    match route {
        Route::Health => Ok(handlers::health(state)),
        Route::Products => handlers::list_products(state, query.as_deref()).await,
        Route::Product(id) => handlers::get_product(state, &id).await,
        Route::Categories => Ok(handlers::list_categories(state)),
        Route::Stock(id) => handlers::check_stock(state, &id).await,
        Route::Reserve(id) => {
            check_body_size(&req, state.config.http.max_body_size)?;
            handlers::reserve_stock(state, &id, req.into_body()).await
        }
    }
}

/// Reject early when `Content-Length` already exceeds the limit
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Result<(), ApiError> {
    let Some(content_length) = req.headers().get(hyper::header::CONTENT_LENGTH) else {
        return Ok(());
    };
    match content_length.to_str().ok().map(str::parse::<u64>) {
        Some(Ok(size)) if size > max_body_size => {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Err(ApiError::PayloadTooLarge {
                limit: max_body_size,
            })
        }
        Some(Ok(_)) => Ok(()),
        _ => {
            logger::log_warning("Invalid Content-Length header, skipping size check");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;
    use crate::config::Config;
    use http_body_util::BodyExt;
    use hyper::StatusCode;
    use serde_json::{json, Value};

    fn test_state() -> Arc<AppState> {
        let builder = Config::defaults()
            .unwrap()
            .set_override("logging.access_log", false)
            .unwrap();
        let cfg: Config = builder.build().unwrap().try_deserialize().unwrap();
        Arc::new(AppState::new(&cfg, CatalogStore::seeded()))
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    fn request(method: Method, uri: &str, body: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap()
    }

    async fn call(state: &Arc<AppState>, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
        let resp = handle_request(request(method, uri, body), Arc::clone(state), peer())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let state = test_state();
        let (status, body) = call(&state, Method::GET, "/health", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "product-service");
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
        assert!(body["uptime"].as_f64().unwrap() >= 0.0);
    }

    #[tokio::test]
    async fn test_list_products_unfiltered() {
        let state = test_state();
        let (status, body) = call(&state, Method::GET, "/products", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 5);
        assert_eq!(body["data"].as_array().unwrap().len(), 5);
        assert_eq!(body["category"], Value::Null);
    }

    #[tokio::test]
    async fn test_list_products_filtered_case_insensitive() {
        let state = test_state();
        let (status, body) = call(&state, Method::GET, "/products?category=Electronics", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 3);
        assert_eq!(body["category"], "Electronics");
        for product in body["data"].as_array().unwrap() {
            assert_eq!(product["category"], "electronics");
        }
    }

    #[tokio::test]
    async fn test_list_products_unknown_category() {
        let state = test_state();
        let (status, body) = call(&state, Method::GET, "/products?category=garden", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 0);
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["category"], "garden");
    }

    #[tokio::test]
    async fn test_get_product() {
        let state = test_state();
        let (status, body) = call(&state, Method::GET, "/products/1", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["id"], "1");
        assert_eq!(body["data"]["name"], "Laptop Pro");
        assert_eq!(body["data"]["createdAt"], "2024-01-15T10:00:00Z");
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let state = test_state();
        let (status, body) = call(&state, Method::GET, "/products/999", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"success": false, "message": "Product not found"}));
    }

    #[tokio::test]
    async fn test_list_categories() {
        let state = test_state();
        let (status, body) = call(&state, Method::GET, "/categories", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 3);
        assert_eq!(body["data"][0]["id"], "electronics");
        assert_eq!(body["data"][0]["name"], "Electronics");
    }

    #[tokio::test]
    async fn test_check_stock() {
        let state = test_state();
        let (status, body) = call(&state, Method::GET, "/products/1/stock", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"success": true, "data": {"productId": "1", "stock": 50, "available": true}})
        );
    }

    #[tokio::test]
    async fn test_reserve_scenario() {
        let state = test_state();

        let (status, body) =
            call(&state, Method::POST, "/products/1/reserve", r#"{"quantity": 10}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "success": true,
                "message": "Stock reserved successfully",
                "data": {"productId": "1", "reserved": 10, "remainingStock": 40}
            })
        );

        let (status, body) =
            call(&state, Method::POST, "/products/1/reserve", r#"{"quantity": 41}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"success": false, "message": "Insufficient stock", "available": 40, "requested": 41})
        );

        let (_, body) = call(&state, Method::GET, "/products/1/stock", "").await;
        assert_eq!(body["data"]["stock"], 40);
        assert_eq!(body["data"]["available"], true);
    }

    #[tokio::test]
    async fn test_reserve_defaults_to_one() {
        let state = test_state();
        for body in ["", "not json", "{}"] {
            let (status, _) = call(&state, Method::POST, "/products/2/reserve", body).await;
            assert_eq!(status, StatusCode::OK);
        }
        let (_, body) = call(&state, Method::GET, "/products/2/stock", "").await;
        assert_eq!(body["data"]["stock"], 97);
    }

    #[tokio::test]
    async fn test_reserve_zero_quantity() {
        let state = test_state();
        let (status, body) =
            call(&state, Method::POST, "/products/1/reserve", r#"{"quantity": 0}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["reserved"], 0);
        assert_eq!(body["data"]["remainingStock"], 50);

        let (_, body) = call(&state, Method::GET, "/products/1/stock", "").await;
        assert_eq!(body["data"]["stock"], 50);
    }

    #[tokio::test]
    async fn test_reserve_rejects_negative_quantity() {
        let state = test_state();
        let (status, body) =
            call(&state, Method::POST, "/products/1/reserve", r#"{"quantity": -5}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Quantity must not be negative");

        let (_, body) = call(&state, Method::GET, "/products/1/stock", "").await;
        assert_eq!(body["data"]["stock"], 50);
    }

    #[tokio::test]
    async fn test_reserve_echoes_requested_quantity_exactly() {
        let state = test_state();
        let (status, body) = call(
            &state,
            Method::POST,
            "/products/1/reserve",
            r#"{"quantity": 18446744073709551615}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["requested"], json!(u64::MAX));
        assert_eq!(body["available"], 50);
    }

    #[tokio::test]
    async fn test_unknown_id_on_every_id_route() {
        let state = test_state();
        for (method, uri) in [
            (Method::GET, "/products/999"),
            (Method::GET, "/products/999/stock"),
            (Method::POST, "/products/999/reserve"),
        ] {
            let (status, body) = call(&state, method, uri, "").await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], "Product not found");
        }
    }

    #[tokio::test]
    async fn test_unmatched_route() {
        let state = test_state();
        for uri in ["/", "/orders", "/products/", "/products/1/price"] {
            let (status, body) = call(&state, Method::GET, uri, "").await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body, json!({"success": false, "message": "Endpoint not found"}));
        }
    }

    #[tokio::test]
    async fn test_wrong_method() {
        let state = test_state();
        let resp = handle_request(request(Method::GET, "/products/1/reserve", ""), state, peer())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["Allow"], "POST, OPTIONS");
    }

    #[tokio::test]
    async fn test_options_preflight() {
        let state = test_state();
        let resp = handle_request(request(Method::OPTIONS, "/products/1/reserve", ""), state, peer())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
    }

    #[tokio::test]
    async fn test_common_headers_on_json_responses() {
        let state = test_state();
        let resp = handle_request(request(Method::GET, "/categories", ""), state, peer())
            .await
            .unwrap();
        assert_eq!(resp.headers()["Content-Type"], "application/json");
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
        assert!(resp.headers()["Server"]
            .to_str()
            .unwrap()
            .starts_with("catalog-service/"));
    }

    #[tokio::test]
    async fn test_declared_body_too_large() {
        let state = test_state();
        let mut req = request(Method::POST, "/products/1/reserve", r#"{"quantity": 1}"#);
        req.headers_mut().insert(
            hyper::header::CONTENT_LENGTH,
            hyper::header::HeaderValue::from_static("99999999"),
        );
        let resp = handle_request(req, Arc::clone(&state), peer()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let (_, body) = call(&state, Method::GET, "/products/1/stock", "").await;
        assert_eq!(body["data"]["stock"], 50);
    }

    #[tokio::test]
    async fn test_declared_length_ignored_outside_reserve() {
        let state = test_state();
        for (uri, expected) in [("/nope", StatusCode::NOT_FOUND), ("/products/1", StatusCode::OK)] {
            let mut req = request(Method::GET, uri, "");
            req.headers_mut().insert(
                hyper::header::CONTENT_LENGTH,
                hyper::header::HeaderValue::from_static("99999999"),
            );
            let resp = handle_request(req, Arc::clone(&state), peer()).await.unwrap();
            assert_eq!(resp.status(), expected, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_head_on_get_route() {
        let state = test_state();
        let resp = handle_request(request(Method::HEAD, "/products/1", ""), Arc::clone(&state), peer())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "application/json");

        let resp = handle_request(request(Method::HEAD, "/products/999", ""), state, peer())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

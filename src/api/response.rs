// API response utility functions module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::error::ApiError;
use super::types::ErrorResponse;
use crate::catalog::CatalogError;
use crate::logger;

const INTERNAL_ERROR_BODY: &str = r#"{"success":false,"message":"Internal server error"}"#;

/// Build JSON response
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(body) {
        Ok(json) => build_json(status, Bytes::from(json)),
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            internal_error()
        }
    }
}

/// 500 with the fixed body; never fails to build
pub fn internal_error() -> Response<Full<Bytes>> {
    build_json(
        StatusCode::INTERNAL_SERVER_ERROR,
        Bytes::from_static(INTERNAL_ERROR_BODY.as_bytes()),
    )
}

/// Map an error to its status and JSON body
pub fn error_response(err: &ApiError) -> Response<Full<Bytes>> {
    let (available, requested) = match err {
        ApiError::Catalog(CatalogError::InsufficientStock {
            available,
            requested,
        }) => (Some(*available), Some(*requested)),
        _ => (None, None),
    };

    let body = ErrorResponse {
        success: false,
        message: err.public_message(),
        available,
        requested,
    };

    let mut response = json_response(err.status(), &body);
    if let ApiError::MethodNotAllowed { allowed, .. } = err {
        response
            .headers_mut()
            .insert(ALLOW, HeaderValue::from_static(*allowed));
    }
    response
}

fn build_json(status: StatusCode, body: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            crate::http::log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::from_static(INTERNAL_ERROR_BODY.as_bytes())))
        })
}

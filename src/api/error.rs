// API error module
// Every failure a request can end in, and the status each one maps to

use hyper::StatusCode;
use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("no route for {0}")]
    EndpointNotFound(String),
    #[error("method {method} not allowed, expected {allowed}")]
    MethodNotAllowed {
        method: String,
        allowed: &'static str,
    },
    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: u64 },
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(CatalogError::NotFound(_)) | Self::EndpointNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Catalog(CatalogError::InsufficientStock { .. } | CatalogError::InvalidQuantity(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message; internal details stay in the logs
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::Catalog(CatalogError::NotFound(_)) => "Product not found",
            Self::Catalog(CatalogError::InsufficientStock { .. }) => "Insufficient stock",
            Self::Catalog(CatalogError::InvalidQuantity(_)) => "Quantity must not be negative",
            Self::EndpointNotFound(_) => "Endpoint not found",
            Self::MethodNotAllowed { .. } => "Method not allowed",
            Self::PayloadTooLarge { .. } => "Payload too large",
            Self::Internal(_) => "Internal server error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::from(CatalogError::NotFound("9".into())), 404),
            (
                ApiError::from(CatalogError::InsufficientStock {
                    available: 1,
                    requested: 2,
                }),
                400,
            ),
            (ApiError::from(CatalogError::InvalidQuantity(-1)), 400),
            (ApiError::EndpointNotFound("/nope".into()), 404),
            (
                ApiError::MethodNotAllowed {
                    method: "DELETE".into(),
                    allowed: "GET",
                },
                405,
            ),
            (ApiError::PayloadTooLarge { limit: 10 }, 413),
            (ApiError::Internal("boom".into()), 500),
        ];
        for (err, status) in cases {
            assert_eq!(err.status().as_u16(), status, "{err}");
        }
    }

    #[test]
    fn test_internal_detail_not_public() {
        let err = ApiError::Internal("serializer exploded".into());
        assert_eq!(err.public_message(), "Internal server error");
        assert!(err.to_string().contains("serializer exploded"));
    }
}

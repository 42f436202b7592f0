//! Typed error handling for the product API
//!
//! Every handler returns an [`ApiResult`]. The single [`IntoResponse`]
//! implementation on [`ApiError`] is the only place where failures are turned
//! into HTTP responses, so no route can answer an error differently from the
//! others.
//!
//! # Error Categories
//!
//! - [`ApiError::NotFound`]: the addressed product (or route) does not exist
//! - [`ApiError::Validation`]: malformed input, see [`ValidationError`]
//! - [`ApiError::Unauthorized`]: missing or wrong API key
//! - [`ApiError::MethodNotAllowed`]: known path, unsupported method
//! - [`ApiError::Internal`]: anything else; details are logged, never returned
//!
//! # Example
//!
//! ```rust,ignore
//! async fn get_product(id: &str) -> ApiResult<Product> {
//!     store.get(id).await?.ok_or_else(|| ApiError::product_not_found(id))
//! }
//! ```

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// Body returned for internal failures, whatever their cause
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// The main error type of the service
#[derive(Debug)]
pub enum ApiError {
    /// Requested resource does not exist
    NotFound { message: String },

    /// Request input failed validation
    Validation(ValidationError),

    /// API key missing or mismatched
    Unauthorized,

    /// Path exists but does not accept the request method
    MethodNotAllowed,

    /// Unexpected failure (store backend, panics, bugs)
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound { message } => write!(f, "{}", message),
            ApiError::Validation(e) => write!(f, "{}", e),
            ApiError::Unauthorized => write!(f, "Unauthorized"),
            ApiError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ApiError {
    /// NotFound error for a product id
    pub fn product_not_found(id: &str) -> Self {
        tracing::debug!(product_id = %id, "product not found");
        ApiError::NotFound {
            message: "Product not found".to_string(),
        }
    }

    /// NotFound error for a path no route matches
    pub fn route_not_found() -> Self {
        ApiError::NotFound {
            message: "Not Found".to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Validation(e) => e.error_code(),
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    ///
    /// Internal details stay in the logs; clients only see a generic message.
    pub fn to_response(&self) -> ErrorResponse {
        let error = match self {
            ApiError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        };
        ErrorResponse { error }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Product payload failed the write schema
    #[error("Invalid product data")]
    InvalidProduct,

    /// `page` or `limit` is not a positive integer
    #[error("Invalid pagination parameters")]
    InvalidPagination,

    /// Search was requested without `q`
    #[error("Missing search query")]
    MissingSearchQuery,

    /// Query string could not be decoded at all
    #[error("Invalid query string: {message}")]
    InvalidQuery { message: String },

    /// Path parameter could not be decoded (e.g. invalid UTF-8 in the id)
    #[error("Invalid path parameter: {message}")]
    InvalidPath { message: String },
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidProduct => "INVALID_PRODUCT",
            ValidationError::InvalidPagination => "INVALID_PAGINATION",
            ValidationError::MissingSearchQuery => "MISSING_SEARCH_QUERY",
            ValidationError::InvalidQuery { .. } => "INVALID_QUERY",
            ValidationError::InvalidPath { .. } => "INVALID_PATH",
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        ApiError::Validation(ValidationError::InvalidQuery {
            message: err.body_text(),
        })
    }
}

impl From<PathRejection> for ApiError {
    fn from(err: PathRejection) -> Self {
        ApiError::Validation(ValidationError::InvalidPath {
            message: err.body_text(),
        })
    }
}

/// Store backends report failures through `anyhow`
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(format!("{:#}", err))
    }
}

/// A specialized Result type for request handling
pub type ApiResult<T> = Result<T, ApiError>;

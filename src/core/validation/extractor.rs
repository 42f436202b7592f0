//! Axum extractor for validated product payloads
//!
//! This module provides the `ValidatedProduct` extractor that parses and
//! validates request bodies before they reach handlers. A body that is not
//! JSON at all is reported exactly like a payload that fails the schema.

use super::validators::validate_product;
use crate::core::error::{ApiError, ValidationError};
use crate::core::product::ProductInput;
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::Value;

/// Axum extractor that yields a validated [`ProductInput`]
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_product(
///     ValidatedProduct(input): ValidatedProduct,
/// ) -> ApiResult<Json<Product>> {
///     // input is already validated
/// }
/// ```
///
/// Being a body extractor, it always runs after every `FromRequestParts`
/// extractor of the handler, so authorization is checked first.
#[derive(Debug)]
pub struct ValidatedProduct(pub ProductInput);

impl ValidatedProduct {
    /// Get the inner payload
    pub fn into_inner(self) -> ProductInput {
        self.0
    }
}

impl<S> FromRequest<S> for ValidatedProduct
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<Value> = Json::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "request body is not JSON");
            ApiError::from(ValidationError::InvalidProduct)
        })?;

        Ok(Self(validate_product(payload)?))
    }
}

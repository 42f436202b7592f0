//! Request extractors shared by the product handlers

use crate::core::auth::{ApiKeyGuard, Operation};
use crate::core::error::ApiError;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use std::sync::Arc;

/// Proof that the request passed the auth guard for its operation
///
/// The operation is derived from the HTTP method, so the same extractor
/// serves create, update and delete. Reads always pass. Declare it before
/// any body extractor so authorization runs before the payload is looked at.
///
/// ```rust,ignore
/// pub async fn update_product(
///     _auth: Authorized,
///     Path(id): Path<String>,
///     ValidatedProduct(input): ValidatedProduct,
/// ) -> ApiResult<Json<Product>> { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Authorized;

impl<S> FromRequestParts<S> for Authorized
where
    S: Send + Sync,
    Arc<ApiKeyGuard>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(operation) = Operation::from_method(&parts.method) else {
            return Ok(Authorized);
        };

        let guard = Arc::<ApiKeyGuard>::from_ref(state);
        guard.authorize(operation, &parts.headers)?;

        Ok(Authorized)
    }
}

//! HTTP handlers for product operations
//!
//! Every handler returns an [`ApiResult`]; failures are turned into
//! responses by [`ApiError`]'s `IntoResponse` implementation only.

use axum::{
    Json,
    extract::{
        FromRef, Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use indexmap::IndexMap;
use std::sync::Arc;

use crate::core::query::{
    ListParams, PaginatedResponse, SearchParams, count_by_category, filter_by_category, paginate,
    search_by_name,
};
use crate::core::{
    ApiError, ApiKeyGuard, ApiResult, Authorized, Product, ProductStore, ValidatedProduct,
};

/// Application state shared across handlers
#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
    pub guard: Arc<ApiKeyGuard>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>, guard: ApiKeyGuard) -> Self {
        Self {
            store,
            guard: Arc::new(guard),
        }
    }
}

/// List products, optionally filtered by category, one page at a time
///
/// GET /api/products?category=&page=&limit=
///
/// `total` is the size of the whole store, regardless of the filter.
pub async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<PaginatedResponse<Product>>> {
    let Query(params) = params?;
    let page = params.page()?;
    let limit = params.limit()?;

    let products = state.store.list().await?;
    let total = products.len();
    let filtered = filter_by_category(products, params.category());

    Ok(Json(PaginatedResponse {
        data: paginate(filtered, page, limit),
        page,
        total,
    }))
}

/// Search products by name
///
/// GET /api/products/search?q=
pub async fn search_products(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Product>>> {
    let Query(params) = params?;
    let query = params.query()?;

    let products = state.store.list().await?;
    Ok(Json(search_by_name(products, query)))
}

/// Product count per category
///
/// GET /api/products/stats
pub async fn product_stats(
    State(state): State<AppState>,
) -> ApiResult<Json<IndexMap<String, usize>>> {
    let products = state.store.list().await?;
    Ok(Json(count_by_category(&products)))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;
    state
        .store
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::product_not_found(&id))
}

/// Create a product under a generated id
///
/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    _auth: Authorized,
    ValidatedProduct(input): ValidatedProduct,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let product = state.store.create(input).await?;
    tracing::info!(product_id = %product.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace every field of an existing product
///
/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    _auth: Authorized,
    id: Result<Path<String>, PathRejection>,
    ValidatedProduct(input): ValidatedProduct,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;
    let product = state
        .store
        .replace(&id, input)
        .await?
        .ok_or_else(|| ApiError::product_not_found(&id))?;
    tracing::info!(product_id = %id, "product updated");
    Ok(Json(product))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    _auth: Authorized,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    if state.store.delete(&id).await? {
        tracing::info!(product_id = %id, "product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::product_not_found(&id))
    }
}

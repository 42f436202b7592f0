//! Router builder for product routes

use crate::products::{
    AppState, create_product, delete_product, get_product, list_products, product_stats,
    search_products, update_product,
};
use crate::core::ApiError;
use axum::{Router, routing::get};

/// Build product routes
///
/// Paths are relative; the REST exposure nests them under `/api`:
/// - GET /products - List (category filter + pagination)
/// - POST /products - Create
/// - GET /products/search?q= - Search by name
/// - GET /products/stats - Count per category
/// - GET /products/{id} - Get one product
/// - PUT /products/{id} - Replace a product
/// - DELETE /products/{id} - Delete a product
///
/// Static segments win over `{id}`, so `search` and `stats` are never
/// treated as product ids. Any other method on these paths gets a JSON 405.
pub fn build_product_routes(state: AppState) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/search", get(search_products))
        .route("/products/stats", get(product_stats))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

/// Answer for a known path requested with an unsupported method
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

//! REST API exposure
//!
//! Assembles the public HTTP surface: the root greeting, health checks, the
//! product routes under `/api`, JSON 404 and 405 fallbacks and the
//! middleware stack.
//!
//! # Middleware order (outermost first)
//!
//! 1. `TraceLayer` (request span)
//! 2. `log_request` (access log with method, path and timestamp)
//! 3. `CatchPanicLayer` (panics become the regular 500 body)

use crate::core::ApiError;
use crate::products::AppState;
use crate::server::middleware::{handle_panic, log_request};
use crate::server::router::{build_product_routes, method_not_allowed};
use axum::{Json, Router, middleware, routing::get};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Plain-text body served on `/`
pub const GREETING: &str = "Hello, World!";

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router around the application state
    ///
    /// # Arguments
    ///
    /// * `state` - Store and auth guard shared by the product handlers
    /// * `custom_routes` - Additional routes to merge at the top level
    pub fn build_router(state: AppState, custom_routes: Vec<Router>) -> Router {
        let mut app = Self::root_routes()
            .merge(Self::health_routes())
            .nest("/api", build_product_routes(state));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app.fallback(Self::not_found)
            .method_not_allowed_fallback(method_not_allowed)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(middleware::from_fn(log_request))
                    .layer(CatchPanicLayer::custom(handle_panic)),
            )
    }

    fn root_routes() -> Router {
        Router::new().route("/", get(Self::greeting))
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    async fn greeting() -> &'static str {
        GREETING
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "product-api"
        }))
    }

    async fn not_found() -> ApiError {
        ApiError::route_not_found()
    }
}

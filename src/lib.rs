//! # product-api
//!
//! A small REST service managing an in-memory catalogue of products.
//!
//! ## Features
//!
//! - **CRUD**: create, read, replace and delete products under `/api/products`
//! - **Queries**: category filter with pagination, name search, per-category stats
//! - **API-key guard**: writes require a shared secret, configurable per operation
//! - **Typed validation**: payloads are checked before they reach a handler
//! - **Uniform errors**: every failure is answered as `{"error": message}`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use product_api::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_config(ServerConfig::load()?)
//!         .with_store(InMemoryProductStore::seeded())
//!         .serve()
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod products;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ApiError, ApiKeyGuard, ApiResult, AuthPolicy, Authorized, Operation, Product,
        ProductInput, ProductStore, ValidatedProduct, ValidationError,
        auth::check_api_key,
        query::{ListParams, PaginatedResponse, SearchParams},
        validation::validate_product,
    };

    // === Handlers ===
    pub use crate::products::AppState;

    // === Storage ===
    pub use crate::storage::{InMemoryProductStore, sample_products};

    // === Config ===
    pub use crate::config::{AuthConfig, ConfigError, ServerConfig};

    // === Server ===
    pub use crate::server::{RestExposure, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}

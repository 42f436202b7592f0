//! Core module: the product model, its store contract, validation, auth and errors

pub mod auth;
pub mod error;
pub mod extractors;
pub mod product;
pub mod query;
pub mod store;
pub mod validation;

pub use auth::{ApiKeyGuard, AuthPolicy, Operation};
pub use error::{ApiError, ApiResult, ValidationError};
pub use extractors::Authorized;
pub use product::{Product, ProductInput};
pub use store::ProductStore;
pub use validation::ValidatedProduct;

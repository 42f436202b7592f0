//! Store trait for product records

use crate::core::product::{Product, ProductInput};
use anyhow::Result;
use async_trait::async_trait;

/// Service trait for the product collection
///
/// The collection is an ordered sequence: `list` returns products in
/// insertion order, `replace` keeps a product at its position and `delete`
/// shifts the products after it. Each call must be atomic with respect to
/// every other call on the same store.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Snapshot of every product in insertion order
    async fn list(&self) -> Result<Vec<Product>>;

    /// Get a product by ID
    async fn get(&self, id: &str) -> Result<Option<Product>>;

    /// Append a new product under a freshly generated ID
    async fn create(&self, input: ProductInput) -> Result<Product>;

    /// Replace every field but the ID, `None` if the ID is unknown
    async fn replace(&self, id: &str, input: ProductInput) -> Result<Option<Product>>;

    /// Remove a product, `false` if the ID is unknown
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Number of products currently stored
    async fn len(&self) -> Result<usize>;

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}

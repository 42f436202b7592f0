//! In-memory implementation of ProductStore

use crate::core::ProductStore;
use crate::core::product::{Product, ProductInput};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory product store
///
/// Products live in a `Vec` so insertion order is the listing order. Every
/// operation holds the lock for its whole body, which makes each one atomic
/// relative to concurrent requests. Clones share the same collection.
#[derive(Clone, Default)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with the sample catalogue
    pub fn seeded() -> Self {
        Self::with_products(sample_products())
    }

    /// Create a store holding the given products, in order
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }
}

/// The three products the service starts with
pub fn sample_products() -> Vec<Product> {
    vec![
        Product::from_input(
            "1",
            ProductInput::new("Laptop", 1200.0)
                .with_description("High-performance laptop with 16GB RAM")
                .with_category("electronics")
                .in_stock(true),
        ),
        Product::from_input(
            "2",
            ProductInput::new("Smartphone", 800.0)
                .with_description("Latest model with 128GB storage")
                .with_category("electronics")
                .in_stock(true),
        ),
        Product::from_input(
            "3",
            ProductInput::new("Coffee Maker", 50.0)
                .with_description("Programmable coffee maker with timer")
                .with_category("kitchen")
                .in_stock(false),
        ),
    ]
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, input: ProductInput) -> Result<Product> {
        let mut products = self.products.write().await;

        // ids are unique across live records
        let mut id = Uuid::new_v4().to_string();
        while products.iter().any(|p| p.id == id) {
            id = Uuid::new_v4().to_string();
        }

        let product = Product::from_input(id, input);
        products.push(product.clone());

        tracing::debug!(product_id = %product.id, "product created");
        Ok(product)
    }

    async fn replace(&self, id: &str, input: ProductInput) -> Result<Option<Product>> {
        let mut products = self.products.write().await;

        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        product.replace_with(input);

        tracing::debug!(product_id = %id, "product replaced");
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut products = self.products.write().await;

        let Some(index) = products.iter().position(|p| p.id == id) else {
            return Ok(false);
        };
        products.remove(index);

        tracing::debug!(product_id = %id, "product deleted");
        Ok(true)
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.products.read().await.len())
    }
}

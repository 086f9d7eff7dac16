//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use products_core::product::Product;
use products_core::storage::{ProductRepository, RepositoryError, Result};

/// In-memory storage backend.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    products: Arc<RwLock<HashMap<String, Product>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored products.
    #[allow(dead_code)]
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }
}

#[async_trait]
impl ProductRepository for InMemoryRepository {
    async fn get_product(&self, barcode: &str) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(barcode).cloned())
    }

    async fn create_product(&self, product: &Product) -> Result<()> {
        let mut products = self.products.write().await;
        if products.contains_key(&product.barcode) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Product",
                id: product.barcode.clone(),
            });
        }
        products.insert(product.barcode.clone(), product.clone());
        Ok(())
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        let mut products = self.products.write().await;
        let stored = products
            .entry(product.barcode.clone())
            .or_insert_with(|| Product::default().with_barcode(product.barcode.clone()));

        stored.name = product.name.clone();
        stored.description = product.description.clone();
        stored.price = product.price;
        Ok(())
    }

    async fn delete_product(&self, barcode: &str) -> Result<()> {
        self.products.write().await.remove(barcode);
        Ok(())
    }
}

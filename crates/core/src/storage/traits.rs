use async_trait::async_trait;

use crate::product::Product;

use super::Result;

/// Repository for product operations.
///
/// This is the only seam through which handlers reach the backing store.
/// Implementations do not retry failed operations.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Gets a product by its barcode. Returns `Ok(None)` when absent.
    async fn get_product(&self, barcode: &str) -> Result<Option<Product>>;

    /// Creates a new product.
    ///
    /// Fails with [`RepositoryError::AlreadyExists`](super::RepositoryError::AlreadyExists)
    /// if a product with the same barcode is already stored.
    async fn create_product(&self, product: &Product) -> Result<()>;

    /// Writes name, description and price for the product's barcode.
    ///
    /// No existence check is made: updating an unknown barcode stores it.
    async fn update_product(&self, product: &Product) -> Result<()>;

    /// Deletes a product by its barcode. Deleting an absent product succeeds.
    async fn delete_product(&self, barcode: &str) -> Result<()>;
}

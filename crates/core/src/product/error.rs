use thiserror::Error;

/// Errors that can occur when validating a product.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductError {
    #[error("Product barcode cannot be empty")]
    MissingBarcode,
    #[error("Product name cannot be empty")]
    MissingName,
    #[error("Product description cannot be empty")]
    MissingDescription,
    #[error("Product price must be greater than zero")]
    NonPositivePrice,
}

use rust_decimal::Decimal;

use super::error::ProductError;
use super::types::Product;

/// Validates a product before it is written to storage.
///
/// A product is valid when barcode, name and description are non-blank and
/// the price is strictly positive. The first violated rule is reported.
pub fn validate_product(product: &Product) -> Result<(), ProductError> {
    if product.barcode.trim().is_empty() {
        return Err(ProductError::MissingBarcode);
    }
    if product.name.trim().is_empty() {
        return Err(ProductError::MissingName);
    }
    if product.description.trim().is_empty() {
        return Err(ProductError::MissingDescription);
    }
    if product.price <= Decimal::ZERO {
        return Err(ProductError::NonPositivePrice);
    }
    Ok(())
}

/// Returns true if the product passes [`validate_product`].
pub fn is_valid_product(product: &Product) -> bool {
    validate_product(product).is_ok()
}

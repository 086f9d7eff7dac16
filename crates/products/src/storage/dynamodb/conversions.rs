//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! products. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;
use std::str::FromStr;

use aws_sdk_dynamodb::types::AttributeValue;
use products_core::product::Product;
use products_core::storage::RepositoryError;
use rust_decimal::Decimal;

// ============================================================================
// Attribute names
// ============================================================================

pub const ATTR_BARCODE: &str = "BarCode";
pub const ATTR_NAME: &str = "ProductName";
pub const ATTR_DESCRIPTION: &str = "Description";
pub const ATTR_PRICE: &str = "Price";

/// Condition that makes a put fail when the barcode is already stored.
pub const CONDITION_NOT_EXISTS: &str = "attribute_not_exists(BarCode)";

/// Update expression writing every non-key attribute.
pub const UPDATE_EXPRESSION: &str = "SET #name = :name, #description = :description, #price = :price";

// ============================================================================
// Product conversions
// ============================================================================

/// Build the primary key for a barcode.
pub fn product_key(barcode: &str) -> HashMap<String, AttributeValue> {
    HashMap::from([(
        ATTR_BARCODE.to_string(),
        AttributeValue::S(barcode.to_string()),
    )])
}

/// Convert a Product to a DynamoDB item.
pub fn product_to_item(product: &Product) -> HashMap<String, AttributeValue> {
    let mut item = product_key(&product.barcode);

    item.insert(
        ATTR_NAME.to_string(),
        AttributeValue::S(product.name.clone()),
    );
    item.insert(
        ATTR_DESCRIPTION.to_string(),
        AttributeValue::S(product.description.clone()),
    );
    item.insert(
        ATTR_PRICE.to_string(),
        AttributeValue::S(product.price.to_string()),
    );

    item
}

/// Expression attribute names for [`UPDATE_EXPRESSION`].
pub fn update_expression_names() -> HashMap<String, String> {
    HashMap::from([
        ("#name".to_string(), ATTR_NAME.to_string()),
        ("#description".to_string(), ATTR_DESCRIPTION.to_string()),
        ("#price".to_string(), ATTR_PRICE.to_string()),
    ])
}

/// Expression attribute values for [`UPDATE_EXPRESSION`].
pub fn update_expression_values(product: &Product) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (":name".to_string(), AttributeValue::S(product.name.clone())),
        (
            ":description".to_string(),
            AttributeValue::S(product.description.clone()),
        ),
        (
            ":price".to_string(),
            AttributeValue::S(product.price.to_string()),
        ),
    ])
}

/// Convert a DynamoDB item to a Product.
///
/// The table is schema-less, so any attribute other than the key may be
/// missing: names and descriptions default to empty strings and the price to
/// zero. A price that is present but not a decimal is an error.
pub fn item_to_product(
    barcode: &str,
    item: &HashMap<String, AttributeValue>,
) -> Result<Product, RepositoryError> {
    let price = match get_optional_string(item, ATTR_PRICE) {
        Some(raw) => parse_price(&raw)?,
        None => Decimal::ZERO,
    };

    Ok(Product {
        barcode: get_optional_string(item, ATTR_BARCODE).unwrap_or_else(|| barcode.to_string()),
        name: get_optional_string(item, ATTR_NAME).unwrap_or_default(),
        description: get_optional_string(item, ATTR_DESCRIPTION).unwrap_or_default(),
        price,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get an optional string attribute.
fn get_optional_string(item: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

/// Parse a price stored in decimal string form.
fn parse_price(raw: &str) -> Result<Decimal, RepositoryError> {
    Decimal::from_str(raw.trim())
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid price {}: {}", ATTR_PRICE, e)))
}

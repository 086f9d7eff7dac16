use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product in the catalog, identified by its barcode.
///
/// The wire shape is `{"barCode", "name", "description", "price"}` with the
/// price as a JSON number. Missing fields deserialize to their defaults so that
/// validation, not parsing, decides whether a payload is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(rename = "barCode")]
    pub barcode: String,
    pub name: String,
    pub description: String,
    #[serde(with = "crate::product::price")]
    pub price: Decimal,
}

impl Product {
    /// Creates a new product.
    pub fn new(
        barcode: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            barcode: barcode.into(),
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    /// Returns a copy of this product with the given barcode.
    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = barcode.into();
        self
    }

    /// Returns a copy of this product with the given price.
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }
}

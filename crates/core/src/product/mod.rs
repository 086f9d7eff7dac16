mod error;
pub mod price;
mod types;
mod validation;

pub use error::ProductError;
pub use types::Product;
pub use validation::{is_valid_product, validate_product};

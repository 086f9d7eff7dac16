pub mod envelope;
pub mod health;
pub mod products;

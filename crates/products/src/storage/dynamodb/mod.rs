//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of
//! `ProductRepository` using `aws-sdk-dynamodb`. One item per barcode, keyed
//! by the `BarCode` partition key.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbRepository;

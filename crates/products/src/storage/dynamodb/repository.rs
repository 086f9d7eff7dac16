//! DynamoDB repository implementation.
//!
//! Implements `ProductRepository` from `products_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;

use products_core::product::Product;
use products_core::storage::{ProductRepository, Result};

use super::conversions::{
    item_to_product, product_key, product_to_item, update_expression_names,
    update_expression_values, CONDITION_NOT_EXISTS, UPDATE_EXPRESSION,
};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_update_item_error,
};
use crate::config::Config;

/// DynamoDB-based repository implementation.
///
/// Holds one SDK client for the life of the process. The client is cheap to
/// clone and safe to share between concurrent requests.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new repository from application configuration.
    ///
    /// Uses the AWS SDK default credential chain. SDK retries are disabled;
    /// each operation is bounded by the configured store timeout.
    pub async fn from_config(config: &Config) -> Self {
        let timeout_config = aws_config::timeout::TimeoutConfig::builder()
            .operation_timeout(config.store_timeout())
            .build();

        let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .retry_config(aws_config::retry::RetryConfig::disabled())
            .timeout_config(timeout_config);

        if let Some(endpoint) = &config.endpoint_url {
            sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
        }

        let sdk_config = sdk_config_loader.load().await;

        tracing::info!(
            table = %config.table_name,
            region = %config.region,
            endpoint = ?config.endpoint_url,
            "Initialized DynamoDB client"
        );

        Self::new(Client::new(&sdk_config), config.table_name.clone())
    }

    /// Get the table name.
    #[allow(dead_code)]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl ProductRepository for DynamoDbRepository {
    async fn get_product(&self, barcode: &str) -> Result<Option<Product>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(product_key(barcode)))
            .consistent_read(true)
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_product(barcode, &item)?)),
            None => Ok(None),
        }
    }

    async fn create_product(&self, product: &Product) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(product_to_item(product)))
            .condition_expression(CONDITION_NOT_EXISTS)
            .send()
            .await
            .map_err(|e| map_put_item_error(e, "Product", product.barcode.clone()))?;

        Ok(())
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        self.client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(product_key(&product.barcode)))
            .update_expression(UPDATE_EXPRESSION)
            .set_expression_attribute_names(Some(update_expression_names()))
            .set_expression_attribute_values(Some(update_expression_values(product)))
            .send()
            .await
            .map_err(map_update_item_error)?;

        Ok(())
    }

    async fn delete_product(&self, barcode: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(product_key(barcode)))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }
}

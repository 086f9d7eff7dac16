//! Application state with repository-based storage.
//!
//! The state is built once per process and cloned into every request. It
//! holds the single store adapter, so the store connection is created on
//! startup and reused by every request that follows.

use std::{sync::Arc, time::Duration};

use products_core::storage::ProductRepository;

use crate::config::Config;

// ============================================================================
// Compile-time feature validation
// ============================================================================

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "dynamodb", feature = "inmemory"))]
compile_error!("Cannot enable both 'dynamodb' and 'inmemory' storage features");

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'dynamodb'");

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Product repository (store adapter).
    pub product_repo: Arc<dyn ProductRepository>,
    /// Per-request timeout applied by the router.
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates a new AppState around an existing repository.
    pub fn new(product_repo: Arc<dyn ProductRepository>) -> Self {
        Self {
            product_repo,
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Sets the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Creates the state for the enabled storage backend.
    #[cfg(feature = "dynamodb")]
    pub async fn from_config(config: &Config) -> Self {
        let repo = crate::storage::DynamoDbRepository::from_config(config).await;
        Self::new(Arc::new(repo)).with_request_timeout(config.request_timeout())
    }

    /// Creates the state for the enabled storage backend.
    #[cfg(all(feature = "inmemory", not(feature = "dynamodb")))]
    pub async fn from_config(config: &Config) -> Self {
        tracing::info!(
            table = %config.table_name,
            "Using in-memory storage, data will not outlive the process"
        );
        let repo = crate::storage::InMemoryRepository::new();
        Self::new(Arc::new(repo)).with_request_timeout(config.request_timeout())
    }
}

#[cfg(test)]
impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(crate::storage::InMemoryRepository::new()))
    }
}

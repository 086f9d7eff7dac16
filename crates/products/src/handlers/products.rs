//! Product CRUD handlers.
//!
//! Each handler maps a [`ProductRequest`] to a [`ProductResponse`]: validate
//! the request shape, parse and validate the product for writes, call the
//! repository, then turn the outcome into a status and JSON body. Shape and
//! validation failures return before the repository is touched.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{Method, StatusCode},
};

use products_core::product::{validate_product, Product};
use products_core::storage::{repository_error_to_status_code, ProductRepository, RepositoryError};

use super::envelope::{ProductRequest, ProductResponse};
use crate::state::AppState;

const INVALID_WRITE_REQUEST: &str = "Invalid HttpMethod or empty request body!";
const INVALID_KEY_REQUEST: &str = "Invalid HttpMethod or missing argument!";
const INVALID_CREATE_PAYLOAD: &str = "Required information missing for creating a new product";
const INVALID_UPDATE_PAYLOAD: &str = "Required information missing for updating a product";
const PRODUCT_NOT_FOUND: &str = "Product not found!";

/// Reject a request whose shape does not fit the handler.
fn shape_violation(status: StatusCode, message: &str) -> ProductResponse {
    tracing::warn!(status = %status, message = %message, "Rejected product request");
    ProductResponse::error(status, message)
}

/// Turn a repository failure into a response.
fn store_failure(operation: &'static str, barcode: &str, error: RepositoryError) -> ProductResponse {
    let status = StatusCode::from_u16(repository_error_to_status_code(&error))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    tracing::error!(
        operation,
        barcode = %barcode,
        kind = ?error.kind(),
        error = %error,
        "Product store operation failed"
    );
    ProductResponse::error(status, error.to_string())
}

/// Check method and body of a write request, then parse and validate the product.
fn parse_write(
    request: &ProductRequest,
    expected: Method,
    invalid_payload: &str,
) -> Result<Product, ProductResponse> {
    if request.method != expected {
        return Err(shape_violation(
            StatusCode::METHOD_NOT_ALLOWED,
            INVALID_WRITE_REQUEST,
        ));
    }
    if request.body_is_empty() {
        return Err(shape_violation(StatusCode::BAD_REQUEST, INVALID_WRITE_REQUEST));
    }

    let product: Product = serde_json::from_slice(&request.body).map_err(|e| {
        tracing::debug!(error = %e, "Failed to parse product payload");
        shape_violation(StatusCode::BAD_REQUEST, invalid_payload)
    })?;

    validate_product(&product).map_err(|e| {
        tracing::debug!(error = %e, "Product failed validation");
        shape_violation(StatusCode::BAD_REQUEST, invalid_payload)
    })?;

    Ok(product)
}

/// Check method and path parameter of a keyed request.
fn parse_key(request: &ProductRequest, expected: Method) -> Result<&str, ProductResponse> {
    match request.barcode() {
        Some(barcode) if request.method == expected => Ok(barcode),
        _ => Err(shape_violation(StatusCode::BAD_REQUEST, INVALID_KEY_REQUEST)),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Create a product (POST /products).
pub async fn create_product(repo: &dyn ProductRepository, request: ProductRequest) -> ProductResponse {
    let product = match parse_write(&request, Method::POST, INVALID_CREATE_PAYLOAD) {
        Ok(product) => product,
        Err(response) => return response,
    };

    tracing::info!(barcode = %product.barcode, "Creating new product");

    match repo.create_product(&product).await {
        Ok(()) => ProductResponse::product(&product),
        Err(e) => store_failure("create", &product.barcode, e),
    }
}

/// Get a product by barcode (GET /products/{barcode}).
pub async fn get_product(repo: &dyn ProductRepository, request: ProductRequest) -> ProductResponse {
    let barcode = match parse_key(&request, Method::GET) {
        Ok(barcode) => barcode,
        Err(response) => return response,
    };

    tracing::info!(barcode = %barcode, "Requested product");

    match repo.get_product(barcode).await {
        Ok(Some(product)) => ProductResponse::product(&product),
        Ok(None) => ProductResponse::error(StatusCode::NOT_FOUND, PRODUCT_NOT_FOUND),
        Err(e) => store_failure("get", barcode, e),
    }
}

/// Update a product (PUT /products).
pub async fn update_product(repo: &dyn ProductRepository, request: ProductRequest) -> ProductResponse {
    let product = match parse_write(&request, Method::PUT, INVALID_UPDATE_PAYLOAD) {
        Ok(product) => product,
        Err(response) => return response,
    };

    tracing::info!(barcode = %product.barcode, "Updating product");

    match repo.update_product(&product).await {
        Ok(()) => ProductResponse::product(&product),
        Err(e) => store_failure("update", &product.barcode, e),
    }
}

/// Delete a product by barcode (DELETE /products/{barcode}).
pub async fn delete_product(repo: &dyn ProductRepository, request: ProductRequest) -> ProductResponse {
    let barcode = match parse_key(&request, Method::DELETE) {
        Ok(barcode) => barcode,
        Err(response) => return response,
    };

    tracing::info!(barcode = %barcode, "Deleting product");

    match repo.delete_product(barcode).await {
        Ok(()) => ProductResponse::empty(),
        Err(e) => store_failure("delete", barcode, e),
    }
}

// ============================================================================
// Routes
// ============================================================================

/// Any method on /products. PUT updates; everything else goes to create,
/// which answers 405 for methods other than POST.
pub async fn products_collection(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> ProductResponse {
    let request = ProductRequest::new(method).with_body(body);
    let repo = state.product_repo.as_ref();

    if request.method == Method::PUT {
        update_product(repo, request).await
    } else {
        create_product(repo, request).await
    }
}

/// Any method on /products/{barcode}. DELETE deletes; everything else goes to
/// get, which answers 400 for methods other than GET.
pub async fn products_item(
    State(state): State<AppState>,
    method: Method,
    Path(barcode): Path<String>,
) -> ProductResponse {
    let request = ProductRequest::new(method).with_barcode(barcode);
    let repo = state.product_repo.as_ref();

    if request.method == Method::DELETE {
        delete_product(repo, request).await
    } else {
        get_product(repo, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use products_core::storage::Result;
    use rust_decimal::Decimal;

    use crate::storage::InMemoryRepository;

    /// Wraps the in-memory repository and counts every call made to it.
    #[derive(Default)]
    struct CountingRepository {
        inner: InMemoryRepository,
        calls: AtomicUsize,
    }

    impl CountingRepository {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn record(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl ProductRepository for CountingRepository {
        async fn get_product(&self, barcode: &str) -> Result<Option<Product>> {
            self.record();
            self.inner.get_product(barcode).await
        }

        async fn create_product(&self, product: &Product) -> Result<()> {
            self.record();
            self.inner.create_product(product).await
        }

        async fn update_product(&self, product: &Product) -> Result<()> {
            self.record();
            self.inner.update_product(product).await
        }

        async fn delete_product(&self, barcode: &str) -> Result<()> {
            self.record();
            self.inner.delete_product(barcode).await
        }
    }

    /// Fails every operation with the given error.
    struct FailingRepository(RepositoryError);

    #[async_trait]
    impl ProductRepository for FailingRepository {
        async fn get_product(&self, _barcode: &str) -> Result<Option<Product>> {
            Err(self.0.clone())
        }

        async fn create_product(&self, _product: &Product) -> Result<()> {
            Err(self.0.clone())
        }

        async fn update_product(&self, _product: &Product) -> Result<()> {
            Err(self.0.clone())
        }

        async fn delete_product(&self, _barcode: &str) -> Result<()> {
            Err(self.0.clone())
        }
    }

    const PEN_JSON: &str = r#"{"barCode":"123","name":"Pen","description":"Blue pen","price":1.5}"#;

    fn pen() -> Product {
        Product::new("123", "Pen", "Blue pen", Decimal::new(15, 1))
    }

    fn post(body: &'static str) -> ProductRequest {
        ProductRequest::new(Method::POST).with_body(body)
    }

    fn put(body: &'static str) -> ProductRequest {
        ProductRequest::new(Method::PUT).with_body(body)
    }

    fn error_message(response: &ProductResponse) -> String {
        let value: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        value["Error"].as_str().unwrap().to_string()
    }

    // ==================== Create ====================

    #[tokio::test]
    async fn test_create_echoes_product() {
        let repo = CountingRepository::default();

        let response = create_product(&repo, post(PEN_JSON)).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, PEN_JSON);
        assert_eq!(repo.inner.get_product("123").await.unwrap(), Some(pen()));
    }

    #[tokio::test]
    async fn test_create_wrong_method_is_405() {
        let repo = CountingRepository::default();

        let request = ProductRequest::new(Method::GET).with_body(PEN_JSON);
        let response = create_product(&repo, request).await;

        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(error_message(&response), INVALID_WRITE_REQUEST);
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_empty_body_is_400() {
        let repo = CountingRepository::default();

        let response = create_product(&repo, post("")).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&response), INVALID_WRITE_REQUEST);
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_malformed_json_is_400() {
        let repo = CountingRepository::default();

        let response = create_product(&repo, post("{not json")).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&response), INVALID_CREATE_PAYLOAD);
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_invalid_products_never_reach_store() {
        let repo = CountingRepository::default();
        let invalid = [
            r#"{"name":"Pen","description":"Blue pen","price":1.5}"#,
            r#"{"barCode":"123","description":"Blue pen","price":1.5}"#,
            r#"{"barCode":"123","name":"Pen","price":1.5}"#,
            r#"{"barCode":"123","name":"Pen","description":"Blue pen"}"#,
            r#"{"barCode":"123","name":"Pen","description":"Blue pen","price":0}"#,
            r#"{"barCode":"123","name":"Pen","description":"Blue pen","price":-2.5}"#,
            r#"{"barCode":"","name":"Pen","description":"Blue pen","price":1.5}"#,
            r#"{"barCode":"123","name":null,"description":"Blue pen","price":1.5}"#,
            r#"{"barCode":"123","name":"Pen","description":"Blue pen","price":"1.5"}"#,
        ];

        for body in invalid {
            let response = create_product(&repo, post(body)).await;
            assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(error_message(&response), INVALID_CREATE_PAYLOAD);
        }

        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_twice_fails_and_keeps_first() {
        let repo = CountingRepository::default();
        create_product(&repo, post(PEN_JSON)).await;

        let response = create_product(
            &repo,
            post(r#"{"barCode":"123","name":"Pencil","description":"HB pencil","price":0.75}"#),
        )
        .await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_message(&response), "Product already exists: 123");
        assert_eq!(repo.inner.get_product("123").await.unwrap(), Some(pen()));
    }

    #[tokio::test]
    async fn test_create_store_failure_is_500() {
        let repo = FailingRepository(RepositoryError::Transient(
            "Throughput exceeded, please retry".to_string(),
        ));

        let response = create_product(&repo, post(PEN_JSON)).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            error_message(&response),
            "Transient failure: Throughput exceeded, please retry"
        );
    }

    #[tokio::test]
    async fn test_padded_barcode_round_trips() {
        let repo = CountingRepository::default();
        let body = r#"{"barCode":" 123 ","name":"Pen","description":"Blue pen","price":1.5}"#;

        let response = create_product(&repo, post(body)).await;
        assert_eq!(response.status, StatusCode::OK);

        let request = ProductRequest::new(Method::GET).with_barcode(" 123 ");
        let response = get_product(&repo, request).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, body);

        let request = ProductRequest::new(Method::DELETE).with_barcode(" 123 ");
        let response = delete_product(&repo, request).await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(repo.inner.get_product(" 123 ").await.unwrap().is_none());

        let response = create_product(&repo, post(body)).await;
        assert_eq!(response.status, StatusCode::OK);
    }

    // ==================== Get ====================

    #[tokio::test]
    async fn test_get_existing_product() {
        let repo = CountingRepository::default();
        repo.inner.create_product(&pen()).await.unwrap();

        let request = ProductRequest::new(Method::GET).with_barcode("123");
        let response = get_product(&repo, request).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, PEN_JSON);
    }

    #[tokio::test]
    async fn test_get_absent_product_is_404() {
        let repo = CountingRepository::default();

        let request = ProductRequest::new(Method::GET).with_barcode("404404");
        let response = get_product(&repo, request).await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body, r#"{"Error":"Product not found!"}"#);
    }

    #[tokio::test]
    async fn test_get_missing_barcode_is_400() {
        let repo = CountingRepository::default();

        let response = get_product(&repo, ProductRequest::new(Method::GET)).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&response), INVALID_KEY_REQUEST);
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_get_wrong_method_is_400() {
        let repo = CountingRepository::default();

        let request = ProductRequest::new(Method::POST).with_barcode("123");
        let response = get_product(&repo, request).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_get_store_failure_is_500() {
        let repo = FailingRepository(RepositoryError::InvalidData(
            "Invalid price Price: bad".to_string(),
        ));

        let request = ProductRequest::new(Method::GET).with_barcode("123");
        let response = get_product(&repo, request).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    // ==================== Update ====================

    #[tokio::test]
    async fn test_update_changes_attributes_only() {
        let repo = CountingRepository::default();
        repo.inner.create_product(&pen()).await.unwrap();

        let body = r#"{"barCode":"123","name":"Marker","description":"Red marker","price":3.25}"#;
        let response = update_product(&repo, put(body)).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, body);

        let stored = repo.inner.get_product("123").await.unwrap().unwrap();
        assert_eq!(stored.barcode, "123");
        assert_eq!(stored.name, "Marker");
        assert_eq!(stored.description, "Red marker");
        assert_eq!(stored.price, Decimal::new(325, 2));
    }

    #[tokio::test]
    async fn test_update_unknown_barcode_upserts() {
        let repo = CountingRepository::default();

        let response = update_product(&repo, put(PEN_JSON)).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(repo.inner.get_product("123").await.unwrap(), Some(pen()));
    }

    #[tokio::test]
    async fn test_update_wrong_method_is_405() {
        let repo = CountingRepository::default();

        let response = update_product(&repo, post(PEN_JSON)).await;

        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_update_invalid_product_is_400() {
        let repo = CountingRepository::default();

        let response = update_product(
            &repo,
            put(r#"{"barCode":"123","name":"Pen","description":"Blue pen","price":0}"#),
        )
        .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&response), INVALID_UPDATE_PAYLOAD);
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_update_store_failure_is_500() {
        let repo = FailingRepository(RepositoryError::ConnectionFailed(
            "Request to DynamoDB timed out".to_string(),
        ));

        let response = update_product(&repo, put(PEN_JSON)).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    // ==================== Delete ====================

    #[tokio::test]
    async fn test_delete_existing_product() {
        let repo = CountingRepository::default();
        repo.inner.create_product(&pen()).await.unwrap();

        let request = ProductRequest::new(Method::DELETE).with_barcode("123");
        let response = delete_product(&repo, request).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, "");
        assert!(repo.inner.get_product("123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_absent_product_succeeds() {
        let repo = CountingRepository::default();

        let request = ProductRequest::new(Method::DELETE).with_barcode("nope");
        let response = delete_product(&repo, request).await;
        assert_eq!(response.status, StatusCode::OK);

        let request = ProductRequest::new(Method::GET).with_barcode("nope");
        let response = get_product(&repo, request).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_missing_barcode_is_400() {
        let repo = CountingRepository::default();

        let request = ProductRequest::new(Method::DELETE).with_barcode("");
        let response = delete_product(&repo, request).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&response), INVALID_KEY_REQUEST);
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_delete_store_failure_is_500() {
        let repo = FailingRepository(RepositoryError::QueryFailed("Table not found".to_string()));

        let request = ProductRequest::new(Method::DELETE).with_barcode("123");
        let response = delete_product(&repo, request).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_message(&response), "Query failed: Table not found");
    }
}

use axum::{
    http::{header, Method, StatusCode},
    routing::{any, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::livez,
        products::{products_collection, products_item},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let request_timeout = state.request_timeout;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    // Method dispatch happens in the handlers so that a wrong method gets the
    // JSON error body instead of axum's bare 405.
    let product_routes = Router::new()
        .route("/products", any(products_collection))
        .route("/products/{barcode}", any(products_item))
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .merge(product_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}

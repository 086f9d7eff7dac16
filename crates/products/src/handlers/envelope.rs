//! Per-request envelope handed to the product handlers, and the response they
//! produce.

use axum::{
    body::Bytes,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};
use products_core::product::Product;

/// The parts of an inbound request the product handlers look at.
#[derive(Debug, Clone)]
pub struct ProductRequest {
    pub method: Method,
    /// The `{barcode}` path parameter, if the route has one.
    pub barcode: Option<String>,
    pub body: Bytes,
}

impl ProductRequest {
    /// Creates an envelope with no path parameter and no body.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            barcode: None,
            body: Bytes::new(),
        }
    }

    /// Sets the barcode path parameter.
    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    /// Sets the request body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// The barcode path parameter, if present and not blank.
    ///
    /// Returned verbatim, surrounding whitespace included, since that is how
    /// a product body's barcode is stored.
    pub fn barcode(&self) -> Option<&str> {
        self.barcode
            .as_deref()
            .filter(|barcode| !barcode.trim().is_empty())
    }

    /// True when the body is empty or only whitespace.
    pub fn body_is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }
}

/// A JSON response from a product handler.
///
/// Always rendered with `Content-Type: application/json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ProductResponse {
    /// 200 with an empty body.
    pub fn empty() -> Self {
        Self {
            status: StatusCode::OK,
            body: String::new(),
        }
    }

    /// 200 with the serialized product.
    pub fn product(product: &Product) -> Self {
        match serde_json::to_string(product) {
            Ok(body) => Self {
                status: StatusCode::OK,
                body,
            },
            Err(e) => Self::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialize product: {e}"),
            ),
        }
    }

    /// An error response with a `{"Error": "<message>"}` body.
    pub fn error(status: StatusCode, message: impl AsRef<str>) -> Self {
        Self {
            status,
            body: serde_json::json!({ "Error": message.as_ref() }).to_string(),
        }
    }
}

impl IntoResponse for ProductResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}

//! Product HTTP Routes
//!
//! One handler per verb/route. Each extracts its input, runs the validator
//! where required, calls the product accessor once, and wraps the outcome in
//! the response envelope. Every success answers 200, mutations included.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{error, warn};

use super::envelope;
use crate::product::{ProductError, ProductService};

// ==================
// Shared State
// ==================

/// Product state shared across handlers
pub struct ProductState {
    pub products: ProductService,
}

impl ProductState {
    pub fn new(products: ProductService) -> Self {
        Self { products }
    }
}

// ==================
// Request Types
// ==================

#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    #[serde(rename = "searchTerm", default)]
    pub search_term: Option<String>,
}

// ==================
// Product Routes
// ==================

/// Create product routes (mounted at `/api/products`)
pub fn product_routes(state: Arc<ProductState>) -> Router {
    Router::new()
        .route("/", post(create_product_handler).get(list_products_handler))
        .route(
            "/:productId",
            get(get_product_handler)
                .patch(update_product_handler)
                .put(update_product_handler)
                .delete(delete_product_handler),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Generic failure path: 500 with the error object
fn respond_error(err: ProductError) -> Response {
    match &err {
        ProductError::Validation(_) => warn!(error = %err, "product input rejected"),
        ProductError::Store(_) => error!(error = %err, "product operation failed"),
    }
    envelope::failure(&err)
}

/// Enveloped 4xx for a request the extractors could not parse
fn request_rejected(part: &'static str, status: StatusCode, message: String) -> Response {
    warn!(%part, %status, error = %message, "request rejected");
    envelope::rejected(status, message)
}

/// JSON body of a write request.
///
/// A body sent without a JSON content type reads as an empty object.
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, Response> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(Value::Object(Map::new())),
        Err(rejection) => Err(request_rejected(
            "body",
            StatusCode::BAD_REQUEST,
            rejection.body_text(),
        )),
    }
}

fn product_id(path: Result<Path<String>, PathRejection>) -> Result<String, Response> {
    path.map(|Path(id)| id)
        .map_err(|rejection| request_rejected("path", rejection.status(), rejection.body_text()))
}

// ==================
// Handlers
// ==================

async fn create_product_handler(
    State(state): State<Arc<ProductState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match json_body(body) {
        Ok(body) => body,
        Err(response) => return response,
    };

    // Validation failures take the generic 500 path here, unlike update.
    let fields = match state.products.validate(&body) {
        Ok(fields) => fields,
        Err(err) => return respond_error(err),
    };

    match state.products.create(fields).await {
        Ok(product) => envelope::ok("Product created successfully!", product),
        Err(err) => respond_error(err),
    }
}

async fn list_products_handler(
    State(state): State<Arc<ProductState>>,
    query: Result<Query<ListProductsQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return request_rejected("query", rejection.status(), rejection.body_text())
        }
    };
    let term = query.search_term.as_deref().filter(|t| !t.is_empty());

    match state.products.list(term).await {
        Ok(products) => {
            let message = match term {
                Some(term) => format!(
                    "Products matching search term '{}' fetched successfully!",
                    term
                ),
                None => "Products fetched successfully!".to_string(),
            };
            envelope::ok(message, products)
        }
        Err(err) => respond_error(err),
    }
}

async fn get_product_handler(
    State(state): State<Arc<ProductState>>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let product_id = match product_id(path) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.products.get(&product_id).await {
        Ok(product) => envelope::ok("Products fetched successfully!", product),
        Err(err) => respond_error(err),
    }
}

async fn update_product_handler(
    State(state): State<Arc<ProductState>>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let product_id = match product_id(path) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let patch = match json_body(body) {
        Ok(body) => body,
        Err(response) => return response,
    };

    match state.products.update(&product_id, &patch).await {
        Ok(product) => envelope::ok("Products updated successfully!", product),
        Err(ProductError::Validation(err)) => {
            warn!(error = %err, "product update rejected");
            envelope::rejected(StatusCode::BAD_REQUEST, err.message())
        }
        Err(err) => respond_error(err),
    }
}

async fn delete_product_handler(
    State(state): State<Arc<ProductState>>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let product_id = match product_id(path) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match state.products.delete(&product_id).await {
        Ok(product) => envelope::ok("Product deleted successfully!", product),
        Err(err) => respond_error(err),
    }
}

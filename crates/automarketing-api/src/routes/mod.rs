//! # HTTP Routes Module
//!
//! JSON endpoints under `/api`.

pub mod health;
pub mod products;

use axum::Router;
use axum::routing::get;
use serde::Serialize;

use crate::context::ApiContext;

pub use health::{HealthResponse, ServiceStatus};

/// `{"data": ...}` success envelope
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub const fn new(data: T) -> Self {
        Self { data }
    }
}

/// `{"success": true}` body for deletes
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Routes for `/api/*`
pub fn api_router() -> Router<ApiContext> {
    Router::new()
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/products/{id}",
            get(products::get_product)
                .patch(products::update_product)
                .delete(products::delete_product),
        )
        .route("/api/health", get(health::health_check))
}

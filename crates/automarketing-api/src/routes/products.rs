//! # Product Handlers
//!
//! CRUD over products. Reads go through the cache; writes go to the store
//! and then invalidate the affected cache keys.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use automarketing_domain::{CreateProductRequest, Product, ProductPatch, ProductStatus};
use automarketing_persistence::cache::keys;

use super::{DataResponse, SuccessResponse};
use crate::context::ApiContext;
use crate::error::{ApiError, ApiResult};

/// Query string for the list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
}

impl ListParams {
    /// Parsed status filter; an absent or empty value means "all".
    fn status(&self) -> ApiResult<Option<ProductStatus>> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Ok(Some(raw.parse()?)),
        }
    }
}

/// A malformed id can never name a stored product.
fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::product_not_found(raw))
}

/// Drop the cached item and every cached list after a write
async fn invalidate(ctx: &ApiContext, id: Option<Uuid>) {
    if let Some(id) = id {
        ctx.cache.delete(&keys::product(id)).await;
    }
    ctx.cache.delete_by_pattern(keys::PRODUCT_LIST_PATTERN).await;
}

/// `GET /api/products?status=`
pub async fn list_products(
    State(ctx): State<ApiContext>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<DataResponse<Vec<Product>>>> {
    let Query(params) = query?;
    let status = params.status()?;

    let products = ctx
        .cache
        .get_or_set(&keys::product_list(status), ctx.ttl.product_list, || {
            ctx.products.list(status)
        })
        .await?;

    Ok(Json(DataResponse::new(products)))
}

/// `GET /api/products/{id}`
pub async fn get_product(
    State(ctx): State<ApiContext>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<DataResponse<Product>>> {
    let id = parse_id(&raw_id)?;

    let product = ctx
        .cache
        .get_or_set(&keys::product(id), ctx.ttl.product, || async {
            ctx.products
                .get_by_id(id)
                .await?
                .ok_or_else(|| ApiError::product_not_found(id))
        })
        .await?;

    Ok(Json(DataResponse::new(product)))
}

/// `POST /api/products`
pub async fn create_product(
    State(ctx): State<ApiContext>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DataResponse<Product>>)> {
    let Json(request) = payload?;
    let new_product = request.validate()?;

    let product = ctx.products.create(&new_product).await?;
    invalidate(&ctx, None).await;

    tracing::info!(product_id = %product.id, name = %product.name, "Created product");
    Ok((StatusCode::CREATED, Json(DataResponse::new(product))))
}

/// `PATCH /api/products/{id}`
pub async fn update_product(
    State(ctx): State<ApiContext>,
    Path(raw_id): Path<String>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> ApiResult<Json<DataResponse<Product>>> {
    let id = parse_id(&raw_id)?;
    let Json(patch) = payload?;
    let patch = patch.validate()?;

    let product = ctx
        .products
        .update(id, &patch)
        .await?
        .ok_or_else(|| ApiError::product_not_found(id))?;
    invalidate(&ctx, Some(id)).await;

    tracing::info!(product_id = %id, "Updated product");
    Ok(Json(DataResponse::new(product)))
}

/// `DELETE /api/products/{id}`
pub async fn delete_product(
    State(ctx): State<ApiContext>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    let id = parse_id(&raw_id)?;

    ctx.products.delete(id).await?;
    invalidate(&ctx, Some(id)).await;

    tracing::info!(product_id = %id, "Deleted product");
    Ok(Json(SuccessResponse { success: true }))
}

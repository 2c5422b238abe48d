use crate::api::extract::ApiJson;
use crate::api::{ApiError, ApiResult, AppState, MessageResponse};
use crate::auth::Shopkeeper;
use crate::model::{Product, ProductCreate, ProductId, ProductPatch, ShopId};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    shop: Option<String>,
}

/// POST /api/products - add a product to one of the caller's shops
pub async fn create(
    State(state): State<AppState>,
    owner: Shopkeeper,
    ApiJson(req): ApiJson<ProductCreate>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    req.validate()?;
    let product = state.products.create_product(&owner, req).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/products?shop={id} - a shop's catalog
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Product>>> {
    let shop = params
        .shop
        .ok_or_else(|| ApiError::bad_request("shop query parameter is required"))?;
    list_catalog(&state, &shop).await
}

/// GET /api/products/shop/{shop_id} - a shop's catalog
pub async fn list_by_shop(
    State(state): State<AppState>,
    Path(shop_id): Path<String>,
) -> ApiResult<Json<Vec<Product>>> {
    list_catalog(&state, &shop_id).await
}

async fn list_catalog(state: &AppState, shop_id: &str) -> ApiResult<Json<Vec<Product>>> {
    let shop_id: ShopId = shop_id.parse()?;
    Ok(Json(state.products.list_for_shop(shop_id).await?))
}

/// PATCH /api/products/{id} - change name, price, stock or category
pub async fn update(
    State(state): State<AppState>,
    owner: Shopkeeper,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ProductPatch>,
) -> ApiResult<Json<Product>> {
    let id: ProductId = id.parse()?;
    Ok(Json(state.products.update_product(&owner, id, patch).await?))
}

/// DELETE /api/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    owner: Shopkeeper,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id: ProductId = id.parse()?;
    state.products.delete_product(&owner, id).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

use crate::api::extract::ApiJson;
use crate::api::{ApiResult, AppState, MessageResponse};
use crate::auth::Shopkeeper;
use crate::model::{NewShopRequest, Shop, ShopId, ShopPatch, ShopSummary, ShopUpdate};
use crate::proximity::NearbyQuery;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

/// Raw `?lat=&lng=&radius=` values; parsed by [`NearbyQuery::parse`] so every
/// malformed value gets the same error shape.
#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    lat: Option<String>,
    lng: Option<String>,
    radius: Option<String>,
}

/// POST /api/shops - open a shop
pub async fn create(
    State(state): State<AppState>,
    owner: Shopkeeper,
    ApiJson(req): ApiJson<NewShopRequest>,
) -> ApiResult<(StatusCode, Json<Shop>)> {
    req.validate()?;
    let shop = state.shops.create_shop(&owner, req).await?;
    Ok((StatusCode::CREATED, Json(shop)))
}

/// GET /api/shops - the caller's shops
pub async fn list_owned(State(state): State<AppState>, owner: Shopkeeper) -> ApiResult<Json<Vec<Shop>>> {
    Ok(Json(state.shops.list_owned(&owner).await?))
}

/// GET /api/shops/nearby - shops within a radius, nearest first
pub async fn nearby(
    State(state): State<AppState>,
    Query(params): Query<NearbyParams>,
) -> ApiResult<Json<Vec<ShopSummary>>> {
    let query = NearbyQuery::parse(
        params.lat.as_deref(),
        params.lng.as_deref(),
        params.radius.as_deref(),
        &state.search,
    )?;
    let ranked = state.shops.find_nearby(&query).await?;
    Ok(Json(ranked.into_iter().map(ShopSummary::from).collect()))
}

/// GET /api/shops/{id}
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Shop>> {
    let id: ShopId = id.parse()?;
    Ok(Json(state.shops.require(id).await?))
}

/// PATCH /api/shops/{id} - rename, retype or move a shop
pub async fn update(
    State(state): State<AppState>,
    owner: Shopkeeper,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ShopPatch>,
) -> ApiResult<Json<Shop>> {
    let id: ShopId = id.parse()?;
    let update = ShopUpdate::try_from(patch)?;
    Ok(Json(state.shops.update_shop(&owner, id, update).await?))
}

/// DELETE /api/shops/{id} - close a shop and remove its products
pub async fn delete(
    State(state): State<AppState>,
    owner: Shopkeeper,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id: ShopId = id.parse()?;
    state.shops.delete_shop(&owner, id).await?;
    Ok(Json(MessageResponse::new("Shop deleted successfully")))
}

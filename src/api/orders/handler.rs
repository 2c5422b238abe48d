use crate::api::extract::ApiJson;
use crate::api::{ApiError, ApiResult, AppState};
use crate::auth::{Customer, Shopkeeper};
use crate::model::{Order, OrderId, OrderRequest, OrderView, Product, ProductId, ShopId, StatusUpdate};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use std::collections::{BTreeSet, HashMap};

pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";
const MAX_IDEMPOTENCY_KEY_LEN: usize = 128;

fn idempotency_key(headers: &HeaderMap) -> ApiResult<Option<String>> {
    let Some(value) = headers.get(IDEMPOTENCY_KEY_HEADER) else {
        return Ok(None);
    };
    let key = value
        .to_str()
        .map_err(|_| ApiError::bad_request("Idempotency-Key must be visible ASCII"))?
        .trim();
    if key.is_empty() || key.len() > MAX_IDEMPOTENCY_KEY_LEN {
        return Err(ApiError::bad_request(format!(
            "Idempotency-Key must be 1 to {MAX_IDEMPOTENCY_KEY_LEN} characters"
        )));
    }
    Ok(Some(key.to_string()))
}

/// POST /api/orders - place an order
///
/// 201 with the new order, or 200 with the original order when the
/// `Idempotency-Key` was already used by this customer.
pub async fn place(
    State(state): State<AppState>,
    customer: Customer,
    headers: HeaderMap,
    ApiJson(req): ApiJson<OrderRequest>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let key = idempotency_key(&headers)?;
    let placed = state.orders.place_order(&customer, req, key).await?;
    let status = if placed.replayed {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(placed.order)))
}

/// GET /api/orders/customer - the caller's order history with products attached
pub async fn list_for_customer(
    State(state): State<AppState>,
    customer: Customer,
) -> ApiResult<Json<Vec<OrderView>>> {
    let orders = state.orders.list_for_customer(&customer).await?;

    let ids: BTreeSet<ProductId> = orders
        .iter()
        .flat_map(|o| o.lines.iter().map(|l| l.product_id))
        .collect();
    let products: HashMap<ProductId, Product> = state
        .products
        .by_ids(ids.into_iter().collect())
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let views = orders
        .into_iter()
        .map(|order| OrderView::populate(order, |id| products.get(&id).cloned()))
        .collect();
    Ok(Json(views))
}

/// GET /api/orders/shop/{shop_id} - incoming orders for one of the caller's shops
pub async fn list_for_shop(
    State(state): State<AppState>,
    owner: Shopkeeper,
    Path(shop_id): Path<String>,
) -> ApiResult<Json<Vec<Order>>> {
    let shop_id: ShopId = shop_id.parse()?;
    Ok(Json(state.orders.list_for_shop(&owner, shop_id).await?))
}

/// PUT /api/orders/{id}/status - advance or cancel an order
pub async fn update_status(
    State(state): State<AppState>,
    owner: Shopkeeper,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<StatusUpdate>,
) -> ApiResult<Json<Order>> {
    let id: OrderId = id.parse()?;
    Ok(Json(state.orders.update_status(&owner, id, update.status).await?))
}

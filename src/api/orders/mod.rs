//! Order placement, history and fulfilment.

mod handler;

use super::AppState;
use axum::routing::{get, post, put};
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::place))
        .route("/customer", get(handler::list_for_customer))
        .route("/shop/{shop_id}", get(handler::list_for_shop))
        .route("/{id}/status", put(handler::update_status))
}

//! Shop catalogs.

mod handler;

use super::AppState;
use axum::routing::{get, patch};
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/shop/{shop_id}", get(handler::list_by_shop))
        .route("/{id}", patch(handler::update).delete(handler::delete))
}

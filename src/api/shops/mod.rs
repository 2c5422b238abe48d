//! Shop management and proximity search.

mod handler;

use super::AppState;
use axum::routing::get;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/shops", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_owned).post(handler::create))
        .route("/nearby", get(handler::nearby))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
}

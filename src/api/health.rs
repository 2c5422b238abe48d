use super::{AppState, MessageResponse};
use axum::routing::get;
use axum::{Json, Router};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

/// GET /api/health - liveness probe
async fn health() -> Json<MessageResponse> {
    Json(MessageResponse::new("Server is running"))
}

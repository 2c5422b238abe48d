use crate::api::extract::ApiJson;
use crate::api::{ApiError, ApiResult, AppState, MessageResponse};
use crate::auth::{hash_password, verify_password, AuthError};
use crate::model::{LoginRequest, RegisterRequest};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/auth/register - create an account
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    req.validate()?;

    let password = req.password;
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(ApiError::internal)??;

    state.users.register(&req.email, hash, req.role).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// POST /api/auth/login - exchange credentials for a token
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let password = req.password;
    let hash = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(ApiError::internal)?;
    if !verified {
        tracing::info!(user = %user.id, "Login failed");
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state.jwt.issue(&user)?;
    tracing::info!(user = %user.id, role = %user.role, "Logged in");
    Ok(Json(TokenResponse { token }))
}

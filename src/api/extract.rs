//! Request extractors: JSON bodies with uniform error responses, and the
//! authenticated caller from the `Authorization: Bearer` header.

use super::{ApiError, AppState};
use crate::auth::{AuthError, Customer, JwtService, Principal, Shopkeeper};
use crate::model::Role;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

/// `Json<T>` whose rejections render as [`ApiError`] (400 with the parser's message).
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
        }
    }
}

impl FromRequestParts<AppState> for Principal {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;
        let token = JwtService::extract_from_header(header).ok_or(AuthError::MissingToken)?;

        state.jwt.verify(token).map_err(|e| {
            tracing::debug!(error = ?e, uri = %parts.uri, "Token rejected");
            ApiError::from(e)
        })
    }
}

impl FromRequestParts<AppState> for Shopkeeper {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match Principal::from_request_parts(parts, state).await? {
            Principal::Shopkeeper(shopkeeper) => Ok(shopkeeper),
            Principal::Customer(_) => Err(AuthError::WrongRole(Role::Shopkeeper).into()),
        }
    }
}

impl FromRequestParts<AppState> for Customer {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match Principal::from_request_parts(parts, state).await? {
            Principal::Customer(customer) => Ok(customer),
            Principal::Shopkeeper(_) => Err(AuthError::WrongRole(Role::Customer).into()),
        }
    }
}

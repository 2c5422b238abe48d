//! # API Errors
//!
//! Every failure leaves the HTTP layer as an [`ApiError`], rendered as
//! `{"code": "...", "message": "..."}` with the matching status. Domain errors convert
//! with `?`; server-side failures are logged here and answered with a generic message.

use crate::auth::AuthError;
use crate::model::{LocationError, ParseIdError};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::shop_actor::ShopError;
use crate::user_actor::UserError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::fmt;

pub type ApiResult<T> = Result<T, ApiError>;

/// An HTTP error response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "FORBIDDEN", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "CONFLICT", message)
    }

    /// A backing store is unreachable. The detail is logged, not returned.
    pub fn unavailable(detail: impl fmt::Display) -> Self {
        tracing::error!(error = %detail, "Store unavailable");
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            "Service temporarily unavailable, please retry",
        )
    }

    /// An unexpected server fault. The detail is logged, not returned.
    pub fn internal(detail: impl fmt::Display) -> Self {
        tracing::error!(error = %detail, "Internal server error");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_SERVER_ERROR",
            "An internal error occurred",
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code,
            message: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::EmailTaken(_) | UserError::Invalid(_) => Self::bad_request(e.to_string()),
            UserError::NotFound(_) => Self::not_found(e.to_string()),
            UserError::StoreUnavailable(_) => Self::unavailable(e),
        }
    }
}

impl From<ShopError> for ApiError {
    fn from(e: ShopError) -> Self {
        match e {
            ShopError::NotFound(_) => Self::not_found(e.to_string()),
            ShopError::Invalid(_) | ShopError::Location(_) => Self::bad_request(e.to_string()),
            ShopError::NotAuthorized(_) => Self::forbidden(e.to_string()),
            ShopError::StoreUnavailable(_) => Self::unavailable(e),
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(_) | ProductError::ShopNotFound(_) => Self::not_found(e.to_string()),
            ProductError::Invalid(_) | ProductError::InvalidUpdate(_) | ProductError::InvalidQuantity(_) => {
                Self::bad_request(e.to_string())
            }
            ProductError::InsufficientStock { .. } => Self::conflict(e.to_string()),
            ProductError::NotAuthorized(_) => Self::forbidden(e.to_string()),
            ProductError::StoreUnavailable(_) => Self::unavailable(e),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(_) | OrderError::ShopNotFound(_) | OrderError::ProductNotFound(_) => {
                Self::not_found(e.to_string())
            }
            OrderError::EmptyOrder | OrderError::InvalidQuantity { .. } | OrderError::ProductNotInShop { .. } => {
                Self::bad_request(e.to_string())
            }
            OrderError::InsufficientStock { .. } | OrderError::InvalidTransition { .. } => {
                Self::conflict(e.to_string())
            }
            OrderError::NotAuthorized(_) => Self::forbidden(e.to_string()),
            OrderError::StoreUnavailable(_) => Self::unavailable(e),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingToken | AuthError::InvalidCredentials => Self::unauthorized(e.to_string()),
            AuthError::InvalidToken(_) | AuthError::ExpiredToken | AuthError::WrongRole(_) => {
                Self::forbidden(e.to_string())
            }
            AuthError::TokenGeneration(_) | AuthError::Hashing(_) => Self::internal(e),
        }
    }
}

impl From<LocationError> for ApiError {
    fn from(e: LocationError) -> Self {
        Self::bad_request(e.to_string())
    }
}

impl From<ParseIdError> for ApiError {
    fn from(e: ParseIdError) -> Self {
        Self::bad_request(e.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        messages.sort();
        Self::bad_request(messages.join(", "))
    }
}

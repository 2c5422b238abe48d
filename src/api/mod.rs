//! # HTTP API
//!
//! The axum router in front of the actor clients. Each resource lives in its own
//! module with a `router()` mounted under `/api`; handlers translate HTTP in and out
//! and leave every rule to the clients.
//!
//! | Prefix          | Module         |
//! |-----------------|----------------|
//! | `/api/auth`     | [`auth`]       |
//! | `/api/shops`    | [`shops`]      |
//! | `/api/products` | [`products`]   |
//! | `/api/orders`   | [`orders`]     |
//! | `/api/health`   | [`health`]     |

pub mod auth;
pub mod error;
pub mod extract;
pub mod health;
pub mod orders;
pub mod products;
pub mod shops;

pub use error::{ApiError, ApiResult};

use crate::auth::JwtService;
use crate::clients::{OrderClient, ProductClient, ShopClient, UserClient};
use crate::config::Config;
use crate::lifecycle::MarketSystem;
use crate::proximity::SearchLimits;
use anyhow::Context;
use axum::http::{HeaderValue, Method, StatusCode, Uri};
use axum::Router;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Shared handler state. Cloned per request; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    pub users: UserClient,
    pub shops: ShopClient,
    pub products: ProductClient,
    pub orders: OrderClient,
    pub jwt: Arc<JwtService>,
    pub search: SearchLimits,
}

impl AppState {
    pub fn new(system: &MarketSystem, config: &Config) -> Self {
        Self {
            users: system.user_client.clone(),
            shops: system.shop_client.clone(),
            products: system.product_client.clone(),
            orders: system.order_client.clone(),
            jwt: Arc::new(JwtService::new(config.jwt.clone())),
            search: config.search,
        }
    }
}

/// `{"message": "..."}` body used by acknowledgement responses.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// All API routes with state applied, without middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(auth::router())
        .merge(shops::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(health::router())
        .fallback(fallback)
        .with_state(state)
}

/// The full application: [`router`] wrapped in tracing, CORS and request timeouts.
pub fn app(state: AppState, config: &Config) -> anyhow::Result<Router> {
    let cors = match &config.cors_allowed_origin {
        Some(origin) => {
            let origin: HeaderValue = origin
                .parse()
                .with_context(|| format!("invalid CORS_ALLOWED_ORIGIN {origin:?}"))?;
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
                .allow_headers(Any)
        }
        None => CorsLayer::permissive(),
    };

    Ok(router(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

async fn fallback(method: Method, uri: Uri) -> ApiError {
    ApiError::not_found(format!("Cannot {method} {}", uri.path()))
}

//! Error types for the Order actor.

use crate::guard::NotAuthorized;
use crate::model::{OrderId, OrderStatus, ProductId, ShopId};
use crate::product_actor::ProductError;
use crate::shop_actor::ShopError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    #[error("Order must contain at least one product")]
    EmptyOrder,

    #[error("Invalid quantity {quantity} for {product}")]
    InvalidQuantity { product: ProductId, quantity: f64 },

    #[error("Shop not found: {0}")]
    ShopNotFound(ShopId),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Product {product} does not belong to shop {shop}")]
    ProductNotInShop { product: ProductId, shop: ShopId },

    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: ProductId,
        requested: f64,
        available: f64,
    },

    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error(transparent)]
    NotAuthorized(#[from] NotAuthorized),

    /// A store involved in the operation could not be reached. Safe to retry.
    #[error("Order store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<ShopError> for OrderError {
    fn from(e: ShopError) -> Self {
        match e {
            ShopError::NotFound(id) => OrderError::ShopNotFound(id),
            ShopError::NotAuthorized(e) => OrderError::NotAuthorized(e),
            other => OrderError::StoreUnavailable(other.to_string()),
        }
    }
}

impl From<ProductError> for OrderError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => OrderError::ProductNotFound(id),
            ProductError::ShopNotFound(id) => OrderError::ShopNotFound(id),
            ProductError::InsufficientStock {
                product,
                requested,
                available,
            } => OrderError::InsufficientStock {
                product,
                requested,
                available,
            },
            ProductError::NotAuthorized(e) => OrderError::NotAuthorized(e),
            other => OrderError::StoreUnavailable(other.to_string()),
        }
    }
}

//! Error types for the Product actor.

use crate::guard::NotAuthorized;
use crate::model::{ProductId, ShopId};
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    #[error("Shop not found: {0}")]
    ShopNotFound(ShopId),

    #[error("Invalid product: {0}")]
    Invalid(String),

    /// A patch was rejected as a whole; nothing was changed.
    #[error("Invalid update: {0}")]
    InvalidUpdate(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(f64),

    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: ProductId,
        requested: f64,
        available: f64,
    },

    #[error(transparent)]
    NotAuthorized(#[from] NotAuthorized),

    /// The product store could not be reached. Safe to retry.
    #[error("Product store unavailable: {0}")]
    StoreUnavailable(String),
}

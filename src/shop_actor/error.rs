//! Error types for the Shop actor.

use crate::guard::NotAuthorized;
use crate::model::{LocationError, ShopId};
use thiserror::Error;

/// Errors that can occur during shop operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShopError {
    #[error("Shop not found: {0}")]
    NotFound(ShopId),

    #[error("Invalid shop: {0}")]
    Invalid(String),

    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    NotAuthorized(#[from] NotAuthorized),

    /// The shop store (or the product store during a cascade) could not be reached.
    #[error("Shop store unavailable: {0}")]
    StoreUnavailable(String),
}

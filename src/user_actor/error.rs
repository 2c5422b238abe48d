//! Error types for the User actor.

use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Invalid user: {0}")]
    Invalid(String),

    /// The user store could not be reached. Safe to retry.
    #[error("User store unavailable: {0}")]
    StoreUnavailable(String),
}

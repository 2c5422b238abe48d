//! # Identity
//!
//! Token issuance and verification, password hashing, and the authenticated
//! [`Principal`] every protected operation receives. The rest of the crate never sees a
//! token or a role string: handlers get a typed `Shopkeeper` or `Customer`, so a customer
//! principal cannot reach shop-mutation code at all.

pub mod jwt;
pub mod password;
pub mod principal;

pub use jwt::*;
pub use password::*;
pub use principal::*;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    /// No bearer token was presented.
    #[error("No token, authorization denied")]
    MissingToken,

    #[error("Token is not valid")]
    InvalidToken(String),

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The principal's role does not allow the operation.
    #[error("Access denied: requires {0} role")]
    WrongRole(crate::model::Role),

    #[error("Token generation failed: {0}")]
    TokenGeneration(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

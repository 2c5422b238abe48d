use crate::model::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Role chosen at registration. It never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Shopkeeper,
    Customer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Shopkeeper => f.write_str("shopkeeper"),
            Role::Customer => f.write_str("customer"),
        }
    }
}

/// A registered account.
///
/// # Actor Framework
/// Managed by the user actor; see [`crate::user_actor`]. The email (lowercased) is the
/// record's unique key.
#[derive(Clone, Serialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Payload for creating a user. The password is already hashed.
#[derive(Clone)]
pub struct UserCreate {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// `POST /api/auth/register` body.
#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub role: Role,
}

/// `POST /api/auth/login` body.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password_hash() {
        let create = UserCreate {
            email: "a@b.com".into(),
            password_hash: "$argon2id$secret".into(),
            role: Role::Customer,
        };
        let printed = format!("{create:?}");
        assert!(!printed.contains("secret"));
        assert!(printed.contains("a@b.com"));
    }

    #[test]
    fn test_register_validation() {
        let bad: RegisterRequest =
            serde_json::from_str(r#"{"email":"nope","password":"123","role":"customer"}"#).unwrap();
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));

        let unknown_role =
            serde_json::from_str::<RegisterRequest>(r#"{"email":"a@b.com","password":"123456","role":"admin"}"#);
        assert!(unknown_role.is_err());
    }
}

//! [`ActorEntity`] implementation for [`User`].

use crate::model::{User, UserCreate, UserId};
use crate::user_actor::UserError;
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

/// Emails are compared case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        let email = normalize_email(&params.email);
        if email.is_empty() || !email.contains('@') {
            return Err(UserError::Invalid(format!("invalid email: {email}")));
        }
        if params.password_hash.is_empty() {
            return Err(UserError::Invalid("missing password hash".into()));
        }
        Ok(Self {
            id,
            email,
            password_hash: params.password_hash,
            role: params.role,
            created_at: Utc::now(),
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.email.clone())
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

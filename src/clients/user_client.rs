use crate::model::{Role, User, UserCreate, UserId};
use crate::user_actor::entity::normalize_email;
use crate::user_actor::UserError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{info, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    /// Stores a new account. The password must already be hashed.
    #[instrument(skip(self, password_hash))]
    pub async fn register(
        &self,
        email: &str,
        password_hash: String,
        role: Role,
    ) -> Result<UserId, UserError> {
        let id = self
            .inner
            .create(UserCreate {
                email: email.to_string(),
                password_hash,
                role,
            })
            .await
            .map_err(Self::map_error)?;
        info!(user = %id, %role, "Registered");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let email = normalize_email(email);
        let mut found = self.find(move |u: &User| u.email == email).await?;
        Ok(found.pop())
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity::<UserError>() {
            Ok(typed) => typed,
            Err(FrameworkError::Conflict { key, .. }) => UserError::EmailTaken(key),
            Err(FrameworkError::NotFound(id)) => UserError::NotFound(id),
            Err(other) => UserError::StoreUnavailable(other.to_string()),
        }
    }
}

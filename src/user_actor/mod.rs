//! # User Actor
//!
//! Holds registered accounts. Users have no dependencies (`Context = ()`), no custom
//! actions and no updates: the role is fixed at registration and accounts are never
//! removed by the marketplace. Email uniqueness is enforced by the store through
//! [`ActorEntity::unique_key`](actor_framework::ActorEntity::unique_key).
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`User`]
//! - [`error`] - [`UserError`]

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::UserClient;
use crate::model::User;
use actor_framework::ResourceActor;

/// Creates a new User actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, UserClient::new(generic_client))
}

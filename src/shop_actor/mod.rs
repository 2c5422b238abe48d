//! # Shop Actor
//!
//! Holds every shop. Proximity search runs as a filtered listing against this actor
//! (see [`crate::proximity`]), and deleting a shop cascades to its products through the
//! product store client injected as context.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ShopClient;
use crate::model::Shop;
use actor_framework::ResourceActor;

/// Creates a new Shop actor and its client.
///
/// Run the actor with the raw product client as context.
pub fn new(buffer_size: usize) -> (ResourceActor<Shop>, ShopClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ShopClient::new(generic_client))
}

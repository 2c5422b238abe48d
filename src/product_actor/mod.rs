//! # Product Actor
//!
//! Holds every product and is the single authority on stock. Reservations and releases
//! are custom actions ([`ProductAction`]) so a stock check and its decrement happen in
//! one actor turn.
//!
//! Products have no dependencies (`Context = ()`). Ownership checks against the shop
//! happen in [`ProductClient`](crate::clients::ProductClient) before requests reach the actor.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Product actor and its raw client.
///
/// The raw client is what the shop actor needs for cascading deletes; wrap it with
/// [`ProductClient::new`](crate::clients::ProductClient::new) for everything else.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}


//! # Order Actor
//!
//! Holds every order and composes new ones. The actor's context is
//! `(ShopClient, ProductClient)`: order creation validates the shop and products and
//! reserves stock from inside `on_create`, so the order is stored only once all of its
//! stock is held.
//!
//! Orders are never deleted; after creation only their status changes, through
//! [`OrderAction::Transition`].

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Order;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its raw client.
///
/// Wrap the client with [`OrderClient::new`](crate::clients::OrderClient::new) once the shop client is available, and run
/// the actor with `(ShopClient, ProductClient)` as context.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}


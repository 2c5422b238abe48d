//! # Actor Framework
//!
//! Building blocks for type-safe, concurrent resource stores. Each resource type gets one
//! actor that owns all of its records and handles requests sequentially; callers talk to it
//! through a cheap, cloneable client.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - domain model and lifecycle hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing and storage
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed async API
//!
//! ## Operations
//!
//! Every actor supports `create`, `get`, `update`, `delete`, a resource-specific
//! `perform_action`, and the set-oriented `list(filter)` / `delete_where(filter)`.
//! Listings are returned in ascending id order, so repeated queries over unchanged data
//! are stable.
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected at **runtime** via `run(context)`, not at construction time:
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor, ResourceClient};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Product { id: u32, stock: u32 }
//! #[derive(Debug)] struct ProductCreate { stock: u32 }
//! #[derive(Debug)] struct ProductUpdate;
//! #[derive(Debug)] enum ProductAction { Reserve(u32) }
//! #[derive(Debug, thiserror::Error)] #[error("insufficient stock")] struct ProductError;
//!
//! #[async_trait]
//! impl ActorEntity for Product {
//!     type Id = u32; type Create = ProductCreate; type Update = ProductUpdate;
//!     type Action = ProductAction; type ActionResult = u32; type Context = (); type Error = ProductError;
//!     fn from_create_params(id: u32, p: ProductCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, stock: p.stock })
//!     }
//!     async fn on_update(&mut self, _: ProductUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, action: ProductAction, _: &()) -> Result<u32, Self::Error> {
//!         let ProductAction::Reserve(n) = action;
//!         if self.stock < n { return Err(ProductError); }
//!         self.stock -= n;
//!         Ok(self.stock)
//!     }
//! }
//!
//! #[derive(Clone, Debug)] struct Order { id: u32 }
//! #[derive(Debug)] struct OrderCreate { product: u32, quantity: u32 }
//! #[derive(Debug)] struct OrderUpdate;
//! #[derive(Debug)] enum OrderAction {}
//! #[derive(Debug, thiserror::Error)] #[error("order rejected")] struct OrderError;
//!
//! // The order needs to reserve stock while it is being created.
//! #[derive(Clone, Debug)] struct PendingOrder { order: Order, product: u32, quantity: u32 }
//!
//! #[async_trait]
//! impl ActorEntity for PendingOrder {
//!     type Id = u32; type Create = OrderCreate; type Update = OrderUpdate;
//!     type Action = OrderAction; type ActionResult = ();
//!     type Context = ResourceClient<Product>; type Error = OrderError;
//!     fn from_create_params(id: u32, p: OrderCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { order: Order { id }, product: p.product, quantity: p.quantity })
//!     }
//!     async fn on_create(&mut self, products: &ResourceClient<Product>) -> Result<(), Self::Error> {
//!         products
//!             .perform_action(self.product, ProductAction::Reserve(self.quantity))
//!             .await
//!             .map(|_| ())
//!             .map_err(|_| OrderError)
//!     }
//!     async fn on_update(&mut self, _: OrderUpdate, _: &Self::Context) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: OrderAction, _: &Self::Context) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (product_actor, products) = ResourceActor::<Product>::new(10);
//!     let (order_actor, orders) = ResourceActor::<PendingOrder>::new(10);
//!
//!     tokio::spawn(product_actor.run(()));
//!     tokio::spawn(order_actor.run(products.clone()));
//!
//!     let product = products.create(ProductCreate { stock: 10 }).await.unwrap();
//!     assert!(orders.create(OrderCreate { product, quantity: 8 }).await.is_ok());
//!     assert!(orders.create(OrderCreate { product, quantity: 8 }).await.is_err());
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor
//! - Multiple actors run in **parallel**
//! - No shared mutable state; clients only hold channel senders
//!
//! ## Testing
//!
//! [`mock::MockClient`] implements the same `ResourceClient<T>` API with scripted
//! responses, for testing client and hook logic without spawning real actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};

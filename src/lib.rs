//! # Dokan
//!
//! > **A hyperlocal marketplace backend built on resource-oriented actors.**
//!
//! Shopkeepers register shops at a fixed location and stock them with products;
//! customers find shops near them and place orders that reserve stock atomically.
//!
//! ## 🏗️ Design
//!
//! Every resource (users, shops, products, orders) is owned by one
//! [`ResourceActor`](actor_framework::ResourceActor) running in its own Tokio task.
//! An actor handles one message at a time, so a stock check and its decrement can never
//! interleave with another order's: two customers racing for the last units of a
//! product cannot both win.
//!
//! ### Actor wiring
//!
//! Dependencies are injected when each actor starts and always point one way:
//!
//! ```text
//! Order ──► Shop, Product
//! Shop  ──► Product        (cascade delete)
//! User, Product            (no dependencies)
//! ```
//!
//! ### Identity
//!
//! Handlers receive a typed [`Shopkeeper`](auth::Shopkeeper) or
//! [`Customer`](auth::Customer) extracted from a verified JWT, never a raw role string.
//! Shop-scoped mutations additionally pass [`guard::assert_owner`].
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`]: records, request bodies, ids and geographic types.
//! - [`user_actor`], [`shop_actor`], [`product_actor`], [`order_actor`]: the
//!   [`ActorEntity`](actor_framework::ActorEntity) implementations and their errors.
//! - [`clients`]: typed wrappers exposing the marketplace operations.
//! - [`proximity`]: "shops near me" queries and ranking.
//! - [`auth`]: passwords, tokens and principals.
//! - [`api`]: the axum HTTP layer.
//! - [`lifecycle`]: actor startup, shutdown and tracing setup.
//! - [`config`]: environment configuration.
//!
//! ## 🚀 Running
//!
//! ```bash
//! JWT_SECRET=change-me-to-something-long RUST_LOG=info cargo run
//! ```

pub mod api;
pub mod auth;
pub mod clients;
pub mod config;
pub mod guard;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod proximity;
pub mod shop_actor;
pub mod user_actor;

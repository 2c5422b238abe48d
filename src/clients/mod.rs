//! # Typed Clients
//!
//! Domain-specific wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//! Handlers and other actors talk to the stores only through these. Each client
//! recovers the typed entity error from [`FrameworkError`](actor_framework::FrameworkError)
//! and adds the cross-resource checks (shop ownership) that a single actor cannot make
//! on its own.

pub mod order_client;
pub mod product_client;
pub mod shop_client;
pub mod user_client;

pub use order_client::*;
pub use product_client::*;
pub use shop_client::*;
pub use user_client::*;

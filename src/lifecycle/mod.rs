//! # System Lifecycle & Orchestration
//!
//! Starts the resource actors, wires them together, and shuts them down.
//!
//! ## Wiring
//!
//! Actors are created first and receive their dependencies later through
//! `run(context)`. The dependency graph is acyclic:
//!
//! ```text
//! User    (no deps)
//! Product (no deps)
//! Shop    -> raw Product client          (cascading delete)
//! Order   -> (ShopClient, ProductClient) (validation, stock reservation)
//! ```
//!
//! `ProductClient` and `OrderClient` also hold a `ShopClient` for ownership checks;
//! these are only used from callers outside the actors.
//!
//! ## Graceful Shutdown
//!
//! Dropping every client closes the actors' channels. Because the graph is acyclic,
//! the actors stop in dependency order as the clients held in each other's contexts
//! are released: Order first, then Shop, then Product. See [`MarketSystem::shutdown`].
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the `tracing` subscriber:
//!
//! ```bash
//! RUST_LOG=info cargo run      # Mutations and lifecycle
//! RUST_LOG=debug cargo run     # Reads and payloads too
//! ```

pub mod market_system;
pub mod telemetry;

pub use market_system::*;
pub use telemetry::*;

//! Tracing subscriber setup.
//!
//! Actors log with an `entity_type` field (`User`, `Shop`, `Product`, `Order`), so
//! module targets are left out of the output.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Defaults to `info` when `RUST_LOG` is unset.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

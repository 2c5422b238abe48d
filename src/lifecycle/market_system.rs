use crate::clients::{OrderClient, ProductClient, ShopClient, UserClient};
use tracing::{error, info};

/// The runtime orchestrator for the marketplace actors.
///
/// `MarketSystem` starts the User, Shop, Product and Order actors, injects each one's
/// context, and hands out the typed clients. Clone the clients freely; call
/// [`shutdown`](Self::shutdown) once every clone outside the system has been dropped.
///
/// # Example
///
/// ```rust
/// use dokan::lifecycle::MarketSystem;
///
/// #[tokio::main]
/// async fn main() {
///     let system = MarketSystem::new(32);
///     let shops = system.shop_client.clone();
///     // ... serve requests ...
///     drop(shops);
///     system.shutdown().await.unwrap();
/// }
/// ```
pub struct MarketSystem {
    pub user_client: UserClient,
    pub shop_client: ShopClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MarketSystem {
    /// Creates the actors, wires their contexts and spawns them.
    ///
    /// `buffer_size` is the request channel capacity of each actor. Must be called from
    /// inside a Tokio runtime.
    pub fn new(buffer_size: usize) -> Self {
        // 1. Create actors (no dependencies yet)
        let (user_actor, user_client) = crate::user_actor::new(buffer_size);
        let (product_actor, raw_products) = crate::product_actor::new(buffer_size);
        let (shop_actor, shop_client) = crate::shop_actor::new(buffer_size);
        let (order_actor, raw_orders) = crate::order_actor::new(buffer_size);

        let product_client = ProductClient::new(raw_products.clone(), shop_client.clone());
        let order_client = OrderClient::new(raw_orders, shop_client.clone());

        // 2. Start actors with injected context
        let user_handle = tokio::spawn(user_actor.run(()));
        let product_handle = tokio::spawn(product_actor.run(()));
        let shop_handle = tokio::spawn(shop_actor.run(raw_products));
        let order_handle = tokio::spawn(
            order_actor.run((shop_client.clone(), product_client.clone())),
        );

        info!(buffer_size, "Market system started");
        Self {
            user_client,
            shop_client,
            product_client,
            order_client,
            handles: vec![order_handle, shop_handle, product_handle, user_handle],
        }
    }

    /// Gracefully shuts down every actor.
    ///
    /// Drops the system's clients, then waits for each actor task. Any clone still
    /// alive elsewhere keeps its actor (and the actors it depends on) running, so drop
    /// those first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down market system...");

        drop(self.order_client);
        drop(self.product_client);
        drop(self.shop_client);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Market system shutdown complete.");
        Ok(())
    }
}

//! # Order Client
//!
//! Order placement for customers and order management for shopkeepers.
//! Composition itself (validation, stock reservation, pricing) runs in the Order actor's
//! `on_create` hook; this client handles idempotent replays and ownership.

use crate::auth::{Customer, Shopkeeper};
use crate::clients::ShopClient;
use crate::guard::assert_owner;
use crate::model::{Order, OrderId, OrderRequest, OrderStatus, ShopId};
use crate::order_actor::{OrderAction, OrderError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{info, instrument, warn};

/// Result of [`OrderClient::place_order`].
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    /// True when an idempotency key matched an earlier order, which is returned instead.
    pub replayed: bool,
}

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    shops: ShopClient,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, shops: ShopClient) -> Self {
        Self { inner, shops }
    }

    /// Fetches an order, failing with [`OrderError::NotFound`] if it does not exist.
    pub async fn require(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id).await?.ok_or(OrderError::NotFound(id))
    }

    /// Places an order for `customer`.
    ///
    /// The total is always computed from stored prices. With an `idempotency_key`, a
    /// repeat of the same key by the same customer returns the first order.
    #[instrument(skip(self, request), fields(customer = %customer.id))]
    pub async fn place_order(
        &self,
        customer: &Customer,
        request: OrderRequest,
        idempotency_key: Option<String>,
    ) -> Result<PlacedOrder, OrderError> {
        let declared_total = request.declared_total();
        let params = request.into_create(customer.id, idempotency_key);

        let id = match self.inner.create(params).await {
            Ok(id) => id,
            Err(FrameworkError::Conflict { existing, .. }) => {
                let id = existing
                    .parse()
                    .map_err(|e: crate::model::ParseIdError| OrderError::StoreUnavailable(e.to_string()))?;
                info!(order = %id, "Idempotent replay");
                return Ok(PlacedOrder {
                    order: self.require(id).await?,
                    replayed: true,
                });
            }
            Err(e) => return Err(Self::map_error(e)),
        };

        let order = self.require(id).await?;
        if let Some(declared) = declared_total {
            if (declared - order.total_price).abs() > 1e-6 {
                warn!(order = %id, declared, computed = order.total_price, "Client total ignored");
            }
        }
        info!(order = %id, total = order.total_price, "Order placed");
        Ok(PlacedOrder {
            order,
            replayed: false,
        })
    }

    /// A customer's orders, newest first.
    #[instrument(skip(self), fields(customer = %customer.id))]
    pub async fn list_for_customer(&self, customer: &Customer) -> Result<Vec<Order>, OrderError> {
        let customer_id = customer.id;
        let mut orders = self.find(move |o: &Order| o.customer_id == customer_id).await?;
        orders.reverse();
        Ok(orders)
    }

    /// Incoming orders for a shop, newest first. Only the shop's owner may list them.
    #[instrument(skip(self), fields(owner = %owner.id))]
    pub async fn list_for_shop(&self, owner: &Shopkeeper, shop_id: ShopId) -> Result<Vec<Order>, OrderError> {
        let shop = self.shops.require(shop_id).await?;
        assert_owner(owner, &shop)?;
        let mut orders = self.find(move |o: &Order| o.shop_id == shop_id).await?;
        orders.reverse();
        Ok(orders)
    }

    /// Moves an order to `status`. Only the owner of the order's shop may do this.
    #[instrument(skip(self), fields(owner = %owner.id))]
    pub async fn update_status(
        &self,
        owner: &Shopkeeper,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrderError> {
        let order = self.require(id).await?;
        let shop = self.shops.require(order.shop_id).await?;
        assert_owner(owner, &shop)?;
        self.inner
            .perform_action(id, OrderAction::Transition(status))
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity::<OrderError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => match id.parse() {
                Ok(id) => OrderError::NotFound(id),
                Err(_) => OrderError::StoreUnavailable(format!("unknown order id {id}")),
            },
            Err(other) => OrderError::StoreUnavailable(other.to_string()),
        }
    }
}

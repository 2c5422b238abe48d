//! [`ActorEntity`] implementation for [`Order`].
//!
//! Order composition happens in `on_create`, inside the order actor's turn:
//!
//! 1. validate the requested lines (non-empty, positive quantities, duplicates merged)
//! 2. check the shop exists and every product exists and belongs to it
//! 3. reserve stock line by line through the product actor, capturing unit prices
//! 4. on any reservation failure, release what was already reserved and abort
//!
//! The total is computed from the captured unit prices; any client-supplied total is
//! ignored before it gets here.

use super::{OrderAction, OrderError};
use crate::clients::{ProductClient, ShopClient};
use crate::model::{Order, OrderCreate, OrderId, OrderItem, OrderLine, OrderStatus};
use crate::product_actor::ProductError;
use actor_framework::{ActorClient, ActorEntity};
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

/// Validates quantities and merges repeated products, keeping first-seen order.
fn merge_items(items: Vec<OrderItem>) -> Result<Vec<OrderItem>, OrderError> {
    if items.is_empty() {
        return Err(OrderError::EmptyOrder);
    }
    let mut merged: Vec<OrderItem> = Vec::with_capacity(items.len());
    for item in items {
        if !item.quantity.is_finite() || item.quantity <= 0.0 {
            return Err(OrderError::InvalidQuantity {
                product: item.product_id,
                quantity: item.quantity,
            });
        }
        match merged.iter_mut().find(|m| m.product_id == item.product_id) {
            Some(existing) => {
                existing.quantity += item.quantity;
                if !existing.quantity.is_finite() {
                    return Err(OrderError::InvalidQuantity {
                        product: existing.product_id,
                        quantity: existing.quantity,
                    });
                }
            }
            None => merged.push(item),
        }
    }
    Ok(merged)
}

/// Puts back stock for lines reserved so far. Failures are logged, not returned.
async fn release_lines(products: &ProductClient, lines: &[OrderLine]) {
    for line in lines {
        if let Err(e) = products.release(line.product_id, line.quantity).await {
            warn!(product = %line.product_id, quantity = line.quantity, error = %e, "Stock release failed");
        }
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = (ShopClient, ProductClient);
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        let now = Utc::now();
        Ok(Self {
            id,
            customer_id: params.customer_id,
            shop_id: params.shop_id,
            lines: Vec::new(),
            total_price: 0.0,
            status: OrderStatus::Pending,
            payment_method: params.payment_method,
            idempotency_key: params.idempotency_key,
            requested: params.items,
            created_at: now,
            updated_at: now,
        })
    }

    /// Idempotency keys are scoped per customer.
    fn unique_key(&self) -> Option<String> {
        self.idempotency_key
            .as_ref()
            .map(|key| format!("{}:{}", self.customer_id, key))
    }

    async fn on_create(&mut self, (shops, products): &Self::Context) -> Result<(), Self::Error> {
        let items = merge_items(std::mem::take(&mut self.requested))?;

        shops
            .get(self.shop_id)
            .await?
            .ok_or(OrderError::ShopNotFound(self.shop_id))?;

        for item in &items {
            let product = products
                .get(item.product_id)
                .await?
                .ok_or(OrderError::ProductNotFound(item.product_id))?;
            if product.shop_id != self.shop_id {
                return Err(OrderError::ProductNotInShop {
                    product: item.product_id,
                    shop: self.shop_id,
                });
            }
        }

        let mut lines: Vec<OrderLine> = Vec::with_capacity(items.len());
        for item in &items {
            match products.reserve(item.product_id, item.quantity).await {
                Ok(reservation) => {
                    debug!(product = %item.product_id, remaining = reservation.remaining, "Reserved");
                    lines.push(OrderLine {
                        product_id: item.product_id,
                        quantity: item.quantity,
                        unit_price: reservation.unit_price,
                    });
                }
                Err(e) => {
                    warn!(order = %self.id, product = %item.product_id, error = %e, "Reservation failed, rolling back");
                    release_lines(products, &lines).await;
                    return Err(match e {
                        ProductError::InvalidQuantity(quantity) => OrderError::InvalidQuantity {
                            product: item.product_id,
                            quantity,
                        },
                        other => other.into(),
                    });
                }
            }
        }

        self.total_price = lines.iter().map(OrderLine::subtotal).sum();
        self.lines = lines;
        info!(order = %self.id, total = self.total_price, lines = self.lines.len(), "Order composed");
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        (_, products): &Self::Context,
    ) -> Result<Order, Self::Error> {
        let OrderAction::Transition(next) = action;
        if !self.status.can_transition_to(next) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        if next == OrderStatus::Cancelled {
            release_lines(products, &self.lines).await;
        }
        info!(order = %self.id, from = %self.status, to = %next, "Status changed");
        self.status = next;
        self.updated_at = Utc::now();
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductId;

    fn item(product: u32, quantity: f64) -> OrderItem {
        OrderItem {
            product_id: ProductId(product),
            quantity,
        }
    }

    #[test]
    fn test_merge_items() {
        let merged = merge_items(vec![item(2, 1.0), item(1, 2.0), item(2, 3.0)]).unwrap();
        assert_eq!(merged, vec![item(2, 4.0), item(1, 2.0)]);
    }

    #[test]
    fn test_merge_rejects_bad_input() {
        assert_eq!(merge_items(vec![]), Err(OrderError::EmptyOrder));
        assert!(matches!(
            merge_items(vec![item(1, 1.0), item(2, 0.0)]),
            Err(OrderError::InvalidQuantity { product, .. }) if product == ProductId(2)
        ));
        assert!(merge_items(vec![item(1, -2.0)]).is_err());
        assert!(merge_items(vec![item(1, f64::NAN)]).is_err());
        // Each line is finite but the merged quantity overflows.
        assert!(matches!(
            merge_items(vec![item(3, 1e308), item(3, 1e308)]),
            Err(OrderError::InvalidQuantity { product, quantity }) if product == ProductId(3) && quantity.is_infinite()
        ));
    }
}

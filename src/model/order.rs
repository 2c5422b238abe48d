use crate::model::{OrderId, Product, ProductId, ShopId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment method recorded when the client does not name one.
pub const DEFAULT_PAYMENT_METHOD: &str = "cash_on_delivery";

/// Lifecycle of an order.
///
/// ```text
/// pending ──► processing ──► shipped ──► delivered
/// pending ──► shipped
/// pending | processing ──► cancelled
/// ```
///
/// `delivered` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether an order in `self` may move to `next`.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        if self.is_terminal() {
            return false;
        }
        matches!(
            (self, next),
            (Pending, Processing)
                | (Pending, Shipped)
                | (Processing, Shipped)
                | (Shipped, Delivered)
                | (Pending, Cancelled)
                | (Processing, Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// One requested line: a product and how much of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "productId", alias = "product")]
    pub product_id: ProductId,
    pub quantity: f64,
}

/// A reserved line with the unit price captured when its stock was reserved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    #[serde(rename = "product")]
    pub product_id: ProductId,
    pub quantity: f64,
    #[serde(rename = "unitPrice")]
    pub unit_price: f64,
}

impl OrderLine {
    pub fn subtotal(&self) -> f64 {
        self.unit_price * self.quantity
    }
}

/// A customer's order from one shop.
///
/// # Actor Framework
/// Managed by the order actor. Creating an order reserves its stock (see
/// [`crate::order_actor`]); the lines and total are fixed from then on and only the
/// status moves.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    #[serde(rename = "customer")]
    pub customer_id: UserId,
    #[serde(rename = "shop")]
    pub shop_id: ShopId,
    #[serde(rename = "products")]
    pub lines: Vec<OrderLine>,
    #[serde(rename = "totalPrice")]
    pub total_price: f64,
    pub status: OrderStatus,
    #[serde(rename = "paymentMethod")]
    pub payment_method: String,
    #[serde(skip_serializing)]
    pub idempotency_key: Option<String>,
    /// Items as requested, consumed by `on_create` to build `lines`.
    #[serde(skip)]
    pub(crate) requested: Vec<OrderItem>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating an order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer_id: UserId,
    pub shop_id: ShopId,
    pub items: Vec<OrderItem>,
    pub payment_method: String,
    pub idempotency_key: Option<String>,
}

/// `POST /api/orders` body, in either of the two shapes clients send.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OrderRequest {
    Lines {
        #[serde(rename = "shopId")]
        shop_id: ShopId,
        products: Vec<OrderItem>,
        #[serde(rename = "totalPrice")]
        total_price: Option<f64>,
        #[serde(rename = "paymentMethod")]
        payment_method: Option<String>,
    },
    Single {
        shop: ShopId,
        product: ProductId,
        quantity: f64,
        #[serde(rename = "totalPrice")]
        total_price: Option<f64>,
        #[serde(rename = "paymentMethod")]
        payment_method: Option<String>,
    },
}

impl OrderRequest {
    /// The total the client claims. Never used for pricing.
    pub fn declared_total(&self) -> Option<f64> {
        match self {
            OrderRequest::Lines { total_price, .. } | OrderRequest::Single { total_price, .. } => {
                *total_price
            }
        }
    }

    pub fn into_create(self, customer_id: UserId, idempotency_key: Option<String>) -> OrderCreate {
        let (shop_id, items, payment_method) = match self {
            OrderRequest::Lines {
                shop_id,
                products,
                payment_method,
                ..
            } => (shop_id, products, payment_method),
            OrderRequest::Single {
                shop,
                product,
                quantity,
                payment_method,
                ..
            } => (
                shop,
                vec![OrderItem {
                    product_id: product,
                    quantity,
                }],
                payment_method,
            ),
        };
        OrderCreate {
            customer_id,
            shop_id,
            items,
            payment_method: payment_method
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
            idempotency_key,
        }
    }
}

/// `PUT /api/orders/:id/status` body.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// An order line with its product record attached (`null` once the product is gone).
#[derive(Debug, Clone, Serialize)]
pub struct PopulatedLine {
    pub product: Option<Product>,
    pub quantity: f64,
    #[serde(rename = "unitPrice")]
    pub unit_price: f64,
}

/// An order with populated lines, as listed in a customer's history.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    #[serde(rename = "_id")]
    pub id: OrderId,
    #[serde(rename = "customer")]
    pub customer_id: UserId,
    #[serde(rename = "shop")]
    pub shop_id: ShopId,
    pub products: Vec<PopulatedLine>,
    #[serde(rename = "totalPrice")]
    pub total_price: f64,
    pub status: OrderStatus,
    #[serde(rename = "paymentMethod")]
    pub payment_method: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl OrderView {
    /// Attaches products looked up by `find` to each line.
    pub fn populate(order: Order, find: impl Fn(ProductId) -> Option<Product>) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            shop_id: order.shop_id,
            products: order
                .lines
                .into_iter()
                .map(|line| PopulatedLine {
                    product: find(line.product_id),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                })
                .collect(),
            total_price: order.total_price,
            status: order.status,
            payment_method: order.payment_method,
            created_at: order.created_at,
        }
    }
}

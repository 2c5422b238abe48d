use crate::model::{ProductId, ShopId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A sellable item belonging to exactly one shop.
///
/// `stock` is a float so products sold by weight (e.g. kilograms) can hold fractional
/// amounts. It never goes negative.
///
/// # Actor Framework
/// Managed by the product actor; stock changes go through
/// [`ProductAction`](crate::product_actor::ProductAction).
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: f64,
    #[serde(rename = "shopId")]
    pub shop_id: ShopId,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a product. Also the `POST /api/products` body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductCreate {
    #[validate(length(min = 1, max = 120, message = "Product name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 60))]
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub stock: f64,
    #[serde(rename = "shopId", alias = "shop")]
    pub shop_id: ShopId,
}

/// `PATCH /api/products/:id` body.
///
/// The allow-list of mutable fields is the struct itself: unknown fields (including
/// `shopId`) fail deserialization, so a patch is either applied in full or not at all.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<f64>,
    pub category: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.stock.is_none() && self.category.is_none()
    }
}

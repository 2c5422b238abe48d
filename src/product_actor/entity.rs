//! [`ActorEntity`] implementation for [`Product`], including the stock actions.

use super::{ProductAction, ProductActionResult, ProductError, Reservation};
use crate::model::{Product, ProductCreate, ProductId, ProductPatch};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

fn check_price(price: f64) -> Result<f64, String> {
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(format!("price must be a positive number, got {price}"))
    }
}

fn check_stock(stock: f64) -> Result<f64, String> {
    if stock.is_finite() && stock >= 0.0 {
        Ok(stock)
    } else {
        Err(format!("stock must be zero or more, got {stock}"))
    }
}

fn check_name(name: &str) -> Result<String, String> {
    let name = name.trim();
    if name.is_empty() {
        Err("name must not be empty".to_string())
    } else {
        Ok(name.to_string())
    }
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            name: check_name(&params.name).map_err(ProductError::Invalid)?,
            category: params.category.trim().to_string(),
            price: check_price(params.price).map_err(ProductError::Invalid)?,
            stock: check_stock(params.stock).map_err(ProductError::Invalid)?,
            shop_id: params.shop_id,
            created_at: Utc::now(),
        })
    }

    /// Applies a patch. Every field is validated before any is written.
    async fn on_update(&mut self, patch: ProductPatch, _ctx: &()) -> Result<(), Self::Error> {
        let name = patch.name.as_deref().map(check_name).transpose();
        let price = patch.price.map(check_price).transpose();
        let stock = patch.stock.map(check_stock).transpose();
        let (name, price, stock) = match (name, price, stock) {
            (Ok(n), Ok(p), Ok(s)) => (n, p, s),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                return Err(ProductError::InvalidUpdate(e))
            }
        };

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(stock) = stock {
            self.stock = stock;
        }
        if let Some(category) = patch.category {
            self.category = category.trim().to_string();
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock)),
            ProductAction::Reserve(quantity) => {
                if !quantity.is_finite() || quantity <= 0.0 {
                    return Err(ProductError::InvalidQuantity(quantity));
                }
                if self.stock < quantity {
                    return Err(ProductError::InsufficientStock {
                        product: self.id,
                        requested: quantity,
                        available: self.stock,
                    });
                }
                self.stock -= quantity;
                Ok(ProductActionResult::Reserve(Reservation {
                    unit_price: self.price,
                    remaining: self.stock,
                }))
            }
            ProductAction::Release(quantity) => {
                if !quantity.is_finite() || quantity <= 0.0 {
                    return Err(ProductError::InvalidQuantity(quantity));
                }
                self.stock += quantity;
                Ok(ProductActionResult::Release(self.stock))
            }
        }
    }
}

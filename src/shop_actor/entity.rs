//! [`ActorEntity`] implementation for [`Shop`].
//!
//! The shop actor's context is the raw product store client, used to delete a shop's
//! products together with the shop.

use super::ShopError;
use crate::model::{Product, Shop, ShopCreate, ShopId, ShopUpdate};
use actor_framework::{ActorEntity, ResourceClient};
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

fn required(field: &str, value: &str) -> Result<String, ShopError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ShopError::Invalid(format!("{field} must not be empty")))
    } else {
        Ok(value.to_string())
    }
}

#[async_trait]
impl ActorEntity for Shop {
    type Id = ShopId;
    type Create = ShopCreate;
    type Update = ShopUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ResourceClient<Product>;
    type Error = ShopError;

    fn from_create_params(id: ShopId, params: ShopCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            name: required("name", &params.name)?,
            shop_type: required("type", &params.shop_type)?,
            location: params.location,
            owner_id: params.owner_id,
            created_at: Utc::now(),
        })
    }

    async fn on_update(&mut self, update: ShopUpdate, _ctx: &Self::Context) -> Result<(), Self::Error> {
        let name = update.name.as_deref().map(|n| required("name", n)).transpose()?;
        let shop_type = update.shop_type.as_deref().map(|t| required("type", t)).transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(shop_type) = shop_type {
            self.shop_type = shop_type;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        Ok(())
    }

    /// Deletes the shop's products. If the product store is gone the shop is kept.
    async fn on_delete(&self, products: &Self::Context) -> Result<(), Self::Error> {
        let shop_id = self.id;
        let removed = products
            .delete_where(move |p: &Product| p.shop_id == shop_id)
            .await
            .map_err(|e| ShopError::StoreUnavailable(e.to_string()))?;
        info!(shop = %shop_id, removed, "Cascaded product delete");
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}

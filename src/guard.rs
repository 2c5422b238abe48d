//! Ownership checks for shop-scoped mutations.
//!
//! Every mutation of a shop, of one of its products, or of one of its orders' status
//! goes through [`assert_owner`] with the typed [`Shopkeeper`] principal.

use crate::auth::Shopkeeper;
use crate::model::{Shop, ShopId, UserId};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("User {user} is not the owner of shop {shop}")]
pub struct NotAuthorized {
    pub user: UserId,
    pub shop: ShopId,
}

/// Fails unless `principal` owns `shop`.
pub fn assert_owner(principal: &Shopkeeper, shop: &Shop) -> Result<(), NotAuthorized> {
    if shop.owner_id == principal.id {
        Ok(())
    } else {
        tracing::warn!(user = %principal.id, shop = %shop.id, owner = %shop.owner_id, "Ownership check failed");
        Err(NotAuthorized {
            user: principal.id,
            shop: shop.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GeoPoint;
    use chrono::Utc;

    fn shop_owned_by(owner: u32) -> Shop {
        Shop {
            id: ShopId(1),
            name: "Corner".into(),
            shop_type: "grocery".into(),
            location: GeoPoint::new(23.81, 90.41).unwrap(),
            owner_id: UserId(owner),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_passes() {
        let shop = shop_owned_by(7);
        assert!(assert_owner(&Shopkeeper { id: UserId(7) }, &shop).is_ok());
    }

    #[test]
    fn test_other_shopkeeper_rejected() {
        let shop = shop_owned_by(7);
        let err = assert_owner(&Shopkeeper { id: UserId(8) }, &shop).unwrap_err();
        assert_eq!(
            err,
            NotAuthorized {
                user: UserId(8),
                shop: ShopId(1)
            }
        );
    }
}

use crate::model::{Coordinates, GeoPoint, LocationError, LocationInput, ShopId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A merchant with a fixed location, owned by one shopkeeper.
///
/// # Actor Framework
/// Managed by the shop actor ([`crate::shop_actor`]). Deleting a shop also deletes its
/// products.
#[derive(Debug, Clone, Serialize)]
pub struct Shop {
    #[serde(rename = "_id")]
    pub id: ShopId,
    pub name: String,
    #[serde(rename = "shopType")]
    pub shop_type: String,
    pub location: GeoPoint,
    #[serde(rename = "owner")]
    pub owner_id: UserId,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a shop.
#[derive(Debug, Clone)]
pub struct ShopCreate {
    pub name: String,
    pub shop_type: String,
    pub location: GeoPoint,
    pub owner_id: UserId,
}

/// Validated changes to a shop. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ShopUpdate {
    pub name: Option<String>,
    pub shop_type: Option<String>,
    pub location: Option<GeoPoint>,
}

/// `POST /api/shops` body.
#[derive(Debug, Deserialize, Validate)]
pub struct NewShopRequest {
    #[validate(length(min = 1, max = 120, message = "Shop name is required"))]
    pub name: String,
    #[serde(rename = "type", alias = "shopType")]
    #[validate(length(min = 1, max = 60, message = "Shop type is required"))]
    pub shop_type: String,
    pub location: LocationInput,
}

impl NewShopRequest {
    pub fn into_create(self, owner_id: UserId) -> Result<ShopCreate, LocationError> {
        Ok(ShopCreate {
            name: self.name.trim().to_string(),
            shop_type: self.shop_type.trim().to_string(),
            location: self.location.try_into()?,
            owner_id,
        })
    }
}

/// `PATCH /api/shops/:id` body. Only these fields may be changed; anything else is
/// rejected when the body is parsed.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShopPatch {
    pub name: Option<String>,
    #[serde(rename = "type", alias = "shopType")]
    pub shop_type: Option<String>,
    pub location: Option<LocationInput>,
}

impl TryFrom<ShopPatch> for ShopUpdate {
    type Error = LocationError;

    fn try_from(patch: ShopPatch) -> Result<Self, Self::Error> {
        Ok(Self {
            name: patch.name,
            shop_type: patch.shop_type,
            location: patch.location.map(GeoPoint::try_from).transpose()?,
        })
    }
}

/// A shop as returned by proximity search.
#[derive(Debug, Clone, Serialize)]
pub struct ShopSummary {
    #[serde(rename = "_id")]
    pub id: ShopId,
    pub name: String,
    #[serde(rename = "shopType")]
    pub shop_type: String,
    pub location: Coordinates,
    /// Great-circle distance from the query point, in meters.
    pub distance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_rejects_unknown_fields() {
        let patch = serde_json::from_str::<ShopPatch>(r#"{"name":"New","owner":"user_9"}"#);
        assert!(patch.is_err());
    }

    #[test]
    fn test_patch_accepts_type_alias_and_geojson() {
        let patch: ShopPatch = serde_json::from_str(
            r#"{"shopType":"pharmacy","location":{"type":"Point","coordinates":[90.41,23.81]}}"#,
        )
        .unwrap();
        let update = ShopUpdate::try_from(patch).unwrap();
        assert_eq!(update.shop_type.as_deref(), Some("pharmacy"));
        assert_eq!(update.location.unwrap().latitude(), 23.81);
        assert!(update.name.is_none());
    }

    #[test]
    fn test_new_shop_request_location_forms() {
        let req: NewShopRequest = serde_json::from_str(
            r#"{"name":" Corner ","type":"grocery","location":{"latitude":23.8,"longitude":90.4}}"#,
        )
        .unwrap();
        let create = req.into_create(UserId(1)).unwrap();
        assert_eq!(create.name, "Corner");
        assert_eq!(create.location.coordinates(), [90.4, 23.8]);
    }

    #[test]
    fn test_shop_serializes_client_shape() {
        let shop = Shop {
            id: ShopId(2),
            name: "Corner".into(),
            shop_type: "grocery".into(),
            location: GeoPoint::new(23.8, 90.4).unwrap(),
            owner_id: UserId(1),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&shop).unwrap();
        assert_eq!(json["_id"], "shop_2");
        assert_eq!(json["shopType"], "grocery");
        assert_eq!(json["owner"], "user_1");
        assert_eq!(json["location"]["latitude"], 23.8);
    }
}

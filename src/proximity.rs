//! # Proximity Search
//!
//! Finds shops within a radius of a point, nearest first.
//!
//! The search runs in two passes: the shop store is asked for every shop inside the
//! query's [`BoundingBox`] (a cheap comparison evaluated inside the actor), then
//! [`rank`] computes exact haversine distances, drops anything beyond the radius and
//! sorts. Equal distances are ordered by ascending shop id, so identical queries over
//! unchanged data always return the same order.

use crate::model::{parse_coordinate, BoundingBox, GeoPoint, LocationError, Shop, ShopSummary};

/// Radius bounds for proximity queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchLimits {
    /// Radius used when the query names none.
    pub default_radius_meters: f64,
    pub max_radius_meters: f64,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            default_radius_meters: 5_000.0,
            max_radius_meters: 50_000.0,
        }
    }
}

/// A validated "within radius of point" query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub center: GeoPoint,
    pub radius_meters: f64,
}

impl NearbyQuery {
    pub fn new(center: GeoPoint, radius_meters: f64, limits: &SearchLimits) -> Result<Self, LocationError> {
        if !radius_meters.is_finite() || radius_meters < 0.0 {
            return Err(LocationError::InvalidRadius(format!(
                "must be a non-negative number, got {radius_meters}"
            )));
        }
        if radius_meters > limits.max_radius_meters {
            return Err(LocationError::InvalidRadius(format!(
                "{radius_meters} exceeds the maximum of {}",
                limits.max_radius_meters
            )));
        }
        Ok(Self {
            center,
            radius_meters,
        })
    }

    /// Builds a query from raw `lat`, `lng` and `radius` query-string values.
    pub fn parse(
        lat: Option<&str>,
        lng: Option<&str>,
        radius: Option<&str>,
        limits: &SearchLimits,
    ) -> Result<Self, LocationError> {
        let latitude = parse_coordinate("lat", lat)?;
        let longitude = parse_coordinate("lng", lng)?;
        let center = GeoPoint::new(latitude, longitude)?;

        let radius_meters = match radius.map(str::trim).filter(|r| !r.is_empty()) {
            None => limits.default_radius_meters,
            Some(raw) => raw
                .parse::<f64>()
                .map_err(|_| LocationError::InvalidRadius(raw.to_string()))?,
        };
        Self::new(center, radius_meters, limits)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::around(&self.center, self.radius_meters)
    }
}

/// A shop matched by a query, with its distance from the query point.
#[derive(Debug, Clone)]
pub struct RankedShop {
    pub shop: Shop,
    pub distance_meters: f64,
}

impl From<RankedShop> for ShopSummary {
    fn from(ranked: RankedShop) -> Self {
        Self {
            id: ranked.shop.id,
            name: ranked.shop.name,
            shop_type: ranked.shop.shop_type,
            location: ranked.shop.location.into(),
            distance: ranked.distance_meters,
        }
    }
}

/// Keeps the shops within the query radius, nearest first, ties by ascending id.
pub fn rank(query: &NearbyQuery, shops: Vec<Shop>) -> Vec<RankedShop> {
    let mut ranked: Vec<RankedShop> = shops
        .into_iter()
        .filter_map(|shop| {
            let distance_meters = query.center.distance_to(&shop.location);
            (distance_meters <= query.radius_meters).then_some(RankedShop {
                shop,
                distance_meters,
            })
        })
        .collect();
    ranked.sort_by(|a, b| {
        a.distance_meters
            .total_cmp(&b.distance_meters)
            .then(a.shop.id.cmp(&b.shop.id))
    });
    ranked
}

//! # Geographic Primitives
//!
//! Shops are located by a [`GeoPoint`]. Internally, and in GeoJSON input, the point is
//! ordered `[longitude, latitude]`; everything this crate sends to clients uses the
//! named `{latitude, longitude}` form ([`Coordinates`]). Mixing the two orders silently
//! produces wrong distances, so conversions between them live only here.
//!
//! Distances are great-circle (haversine) distances on a sphere of
//! [`EARTH_RADIUS_METERS`].

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Mean equatorial radius used for every distance computation.
pub const EARTH_RADIUS_METERS: f64 = 6_378_100.0;

/// Slack added to bounding boxes so floating-point rounding never excludes a point on
/// the edge of the search circle.
const BOX_EPSILON_DEGREES: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error("Missing {0} coordinate")]
    MissingCoordinate(&'static str),

    #[error("Invalid {name} coordinate: {value}")]
    InvalidCoordinate { name: &'static str, value: String },

    #[error("Latitude must be between -90 and 90, got {0}")]
    LatitudeOutOfRange(f64),

    #[error("Longitude must be between -180 and 180, got {0}")]
    LongitudeOutOfRange(f64),

    #[error("Invalid location geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid radius: {0}")]
    InvalidRadius(String),
}

/// A validated point on the earth's surface, stored as `[longitude, latitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "Coordinates")]
pub struct GeoPoint {
    coordinates: [f64; 2],
}

impl GeoPoint {
    /// Builds a point from latitude and longitude in degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            coordinates: [longitude, latitude],
        })
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    /// Storage order: `[longitude, latitude]`.
    pub fn coordinates(&self) -> [f64; 2] {
        self.coordinates
    }

    /// Haversine distance in meters.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude().to_radians();
        let lat2 = other.latitude().to_radians();
        let d_lat = lat2 - lat1;
        let d_lng = (other.longitude() - self.longitude()).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().min(1.0).asin();
        EARTH_RADIUS_METERS * c
    }
}

/// Client-facing `{latitude, longitude}` form of a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<GeoPoint> for Coordinates {
    fn from(point: GeoPoint) -> Self {
        Self {
            latitude: point.latitude(),
            longitude: point.longitude(),
        }
    }
}

/// GeoJSON point as sent by clients: `{ "type": "Point", "coordinates": [lng, lat] }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoJsonPoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<f64>,
}

/// Any accepted location input: GeoJSON or named coordinates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LocationInput {
    GeoJson(GeoJsonPoint),
    LatLng(Coordinates),
}

impl TryFrom<LocationInput> for GeoPoint {
    type Error = LocationError;

    fn try_from(input: LocationInput) -> Result<Self, Self::Error> {
        match input {
            LocationInput::GeoJson(point) => {
                if point.kind != "Point" {
                    return Err(LocationError::InvalidGeometry(format!(
                        "expected type Point, got {}",
                        point.kind
                    )));
                }
                match point.coordinates.as_slice() {
                    [longitude, latitude] => GeoPoint::new(*latitude, *longitude),
                    other => Err(LocationError::InvalidGeometry(format!(
                        "expected [longitude, latitude], got {} values",
                        other.len()
                    ))),
                }
            }
            LocationInput::LatLng(c) => GeoPoint::new(c.latitude, c.longitude),
        }
    }
}

/// Parses one query-string coordinate. Missing and non-numeric values are errors.
pub fn parse_coordinate(name: &'static str, raw: Option<&str>) -> Result<f64, LocationError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let Some(raw) = raw else {
        return Err(LocationError::MissingCoordinate(name));
    };
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LocationError::InvalidCoordinate {
            name,
            value: raw.to_string(),
        }),
    }
}

/// A latitude/longitude box enclosing every point within some radius of a center.
///
/// Used as a cheap prefilter before the exact haversine check; it may admit points
/// outside the circle but never rejects one inside it.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    min_latitude: f64,
    max_latitude: f64,
    center_longitude: f64,
    /// `None` when the circle reaches a pole and every longitude qualifies.
    longitude_delta: Option<f64>,
}

impl BoundingBox {
    pub fn around(center: &GeoPoint, radius_meters: f64) -> Self {
        let angular = radius_meters / EARTH_RADIUS_METERS;
        let lat = center.latitude().to_radians();
        let min_lat = lat - angular;
        let max_lat = lat + angular;

        let longitude_delta = if min_lat <= -FRAC_PI_2 || max_lat >= FRAC_PI_2 {
            None
        } else {
            let ratio = angular.sin() / lat.cos();
            (ratio < 1.0).then(|| ratio.asin().to_degrees() + BOX_EPSILON_DEGREES)
        };

        Self {
            min_latitude: min_lat.to_degrees() - BOX_EPSILON_DEGREES,
            max_latitude: max_lat.to_degrees() + BOX_EPSILON_DEGREES,
            center_longitude: center.longitude(),
            longitude_delta,
        }
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        let lat = point.latitude();
        if lat < self.min_latitude || lat > self.max_latitude {
            return false;
        }
        match self.longitude_delta {
            None => true,
            Some(delta) => longitude_gap(self.center_longitude, point.longitude()) <= delta,
        }
    }
}

/// Absolute longitude difference in degrees, taking the short way across the antimeridian.
fn longitude_gap(a: f64, b: f64) -> f64 {
    let gap = (a - b).abs() % 360.0;
    if gap > 180.0 {
        360.0 - gap
    } else {
        gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    #[test]
    fn test_storage_order_is_lng_lat() {
        let p = point(23.8103, 90.4125);
        assert_eq!(p.coordinates(), [90.4125, 23.8103]);

        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json["latitude"], 23.8103);
        assert_eq!(json["longitude"], 90.4125);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            GeoPoint::new(91.0, 0.0),
            Err(LocationError::LatitudeOutOfRange(_))
        ));
        assert!(matches!(
            GeoPoint::new(0.0, -180.5),
            Err(LocationError::LongitudeOutOfRange(_))
        ));
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_haversine_short_distance() {
        let shop = point(23.8103, 90.4125);
        let customer = point(23.8110, 90.4130);
        let d = shop.distance_to(&customer);
        assert!((80.0..110.0).contains(&d), "distance was {d}");
        assert!((d - customer.distance_to(&shop)).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_one_degree_of_latitude() {
        let d = point(0.0, 0.0).distance_to(&point(1.0, 0.0));
        let expected = EARTH_RADIUS_METERS * 1f64.to_radians();
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn test_geojson_input_is_lng_lat() {
        let input: LocationInput =
            serde_json::from_str(r#"{"type":"Point","coordinates":[90.4125,23.8103]}"#).unwrap();
        let p = GeoPoint::try_from(input).unwrap();
        assert_eq!(p.latitude(), 23.8103);
        assert_eq!(p.longitude(), 90.4125);

        let named: LocationInput =
            serde_json::from_str(r#"{"latitude":23.8103,"longitude":90.4125}"#).unwrap();
        assert_eq!(GeoPoint::try_from(named).unwrap(), p);
    }

    #[test]
    fn test_geojson_rejects_bad_shapes() {
        let polygon: LocationInput =
            serde_json::from_str(r#"{"type":"Polygon","coordinates":[1.0,2.0]}"#).unwrap();
        assert!(matches!(
            GeoPoint::try_from(polygon),
            Err(LocationError::InvalidGeometry(_))
        ));

        let short: LocationInput =
            serde_json::from_str(r#"{"type":"Point","coordinates":[1.0]}"#).unwrap();
        assert!(GeoPoint::try_from(short).is_err());
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("lat", Some("23.81")), Ok(23.81));
        assert_eq!(
            parse_coordinate("lat", None),
            Err(LocationError::MissingCoordinate("lat"))
        );
        assert!(matches!(
            parse_coordinate("lng", Some("abc")),
            Err(LocationError::InvalidCoordinate { name: "lng", .. })
        ));
        assert!(parse_coordinate("lng", Some("NaN")).is_err());
        assert!(parse_coordinate("lng", Some("inf")).is_err());
    }

    #[test]
    fn test_bounding_box_never_excludes_points_in_radius() {
        let center = point(60.0, 10.0);
        let radius = 5_000.0;
        let bbox = BoundingBox::around(&center, radius);

        for i in 0..360 {
            let bearing = (i as f64).to_radians();
            // Walk to a point just inside the circle along each bearing.
            let angular = radius * 0.999 / EARTH_RADIUS_METERS;
            let lat1 = center.latitude().to_radians();
            let lng1 = center.longitude().to_radians();
            let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
            let lng2 = lng1
                + (bearing.sin() * angular.sin() * lat1.cos())
                    .atan2(angular.cos() - lat1.sin() * lat2.sin());
            let p = point(lat2.to_degrees(), lng2.to_degrees());
            assert!(center.distance_to(&p) <= radius);
            assert!(bbox.contains(&p), "bearing {i} excluded");
        }

        assert!(!bbox.contains(&point(61.0, 10.0)));
        assert!(!bbox.contains(&point(60.0, 11.0)));
    }

    #[test]
    fn test_bounding_box_wraps_antimeridian() {
        let center = point(0.0, 179.99);
        let bbox = BoundingBox::around(&center, 5_000.0);
        assert!(bbox.contains(&point(0.0, -179.99)));
        assert!(!bbox.contains(&point(0.0, 0.0)));
    }

    #[test]
    fn test_bounding_box_near_pole_keeps_all_longitudes() {
        let center = point(89.99, 0.0);
        let bbox = BoundingBox::around(&center, 5_000.0);
        assert!(bbox.contains(&point(89.99, 180.0)));
    }
}

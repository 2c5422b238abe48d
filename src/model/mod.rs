//! # Domain Model
//!
//! Plain data types for the four stored resources (users, shops, products, orders) and
//! the geographic primitives shops are located with. The types here carry no behavior
//! beyond validation and serialization; the actors in [`crate::user_actor`],
//! [`crate::shop_actor`], [`crate::product_actor`] and [`crate::order_actor`] own them.
//!
//! ## Identifiers
//!
//! Every resource has its own id newtype over `u32` so a `ShopId` can never be passed where
//! a `ProductId` is expected. On the wire an id is a prefixed string (`"shop_3"`); on the
//! way in, both the prefixed form and the bare number (`"3"` or `3`) are accepted.

pub mod geo;
pub mod order;
pub mod product;
pub mod shop;
pub mod user;

pub use geo::*;
pub use order::*;
pub use product::*;
pub use shop::*;
pub use user::*;

/// Error returned when a string cannot be read as a resource id.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid {kind} id: {value}")]
pub struct ParseIdError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s.strip_prefix(concat!($prefix, "_")).unwrap_or(s);
                digits.parse().map(Self).map_err(|_| ParseIdError {
                    kind: $prefix,
                    value: s.to_string(),
                })
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                #[derive(serde::Deserialize)]
                #[serde(untagged)]
                enum Raw {
                    Number(u32),
                    Text(String),
                }

                match Raw::deserialize(deserializer)? {
                    Raw::Number(id) => Ok(Self(id)),
                    Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
                }
            }
        }
    };
}

entity_id!(
    /// Identifier of a registered [`User`].
    UserId,
    "user"
);
entity_id!(
    /// Identifier of a [`Shop`].
    ShopId,
    "shop"
);
entity_id!(
    /// Identifier of a [`Product`].
    ProductId,
    "product"
);
entity_id!(
    /// Identifier of an [`Order`].
    OrderId,
    "order"
);

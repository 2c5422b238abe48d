//! # Shop Client
//!
//! Shop lifecycle for shopkeepers (create, update, delete, list own) and proximity
//! search for everyone.

use crate::auth::Shopkeeper;
use crate::guard::assert_owner;
use crate::model::{NewShopRequest, Shop, ShopId, ShopUpdate};
use crate::proximity::{self, NearbyQuery, RankedShop};
use crate::shop_actor::ShopError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Shop actor.
#[derive(Clone)]
pub struct ShopClient {
    inner: ResourceClient<Shop>,
}

impl ShopClient {
    pub fn new(inner: ResourceClient<Shop>) -> Self {
        Self { inner }
    }

    /// Fetches a shop, failing with [`ShopError::NotFound`] if it does not exist.
    pub async fn require(&self, id: ShopId) -> Result<Shop, ShopError> {
        self.get(id).await?.ok_or(ShopError::NotFound(id))
    }

    #[instrument(skip(self, request), fields(owner = %owner.id))]
    pub async fn create_shop(&self, owner: &Shopkeeper, request: NewShopRequest) -> Result<Shop, ShopError> {
        let params = request.into_create(owner.id)?;
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(shop = %id, "Shop created");
        self.require(id).await
    }

    #[instrument(skip(self, update), fields(owner = %owner.id))]
    pub async fn update_shop(
        &self,
        owner: &Shopkeeper,
        id: ShopId,
        update: ShopUpdate,
    ) -> Result<Shop, ShopError> {
        let shop = self.require(id).await?;
        assert_owner(owner, &shop)?;
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Deletes a shop and, through the shop actor's delete hook, its products.
    #[instrument(skip(self), fields(owner = %owner.id))]
    pub async fn delete_shop(&self, owner: &Shopkeeper, id: ShopId) -> Result<(), ShopError> {
        let shop = self.require(id).await?;
        assert_owner(owner, &shop)?;
        self.delete(id).await
    }

    /// Every shop owned by `owner`, in creation order.
    #[instrument(skip(self), fields(owner = %owner.id))]
    pub async fn list_owned(&self, owner: &Shopkeeper) -> Result<Vec<Shop>, ShopError> {
        let owner_id = owner.id;
        self.find(move |s: &Shop| s.owner_id == owner_id).await
    }

    /// Shops within the query radius, nearest first.
    #[instrument(skip(self))]
    pub async fn find_nearby(&self, query: &NearbyQuery) -> Result<Vec<RankedShop>, ShopError> {
        let bbox = query.bounding_box();
        let candidates = self.find(move |s: &Shop| bbox.contains(&s.location)).await?;
        let candidate_count = candidates.len();
        let ranked = proximity::rank(query, candidates);
        debug!(candidates = candidate_count, matched = ranked.len(), "Nearby search");
        Ok(ranked)
    }
}

#[async_trait]
impl ActorClient<Shop> for ShopClient {
    type Error = ShopError;

    fn inner(&self) -> &ResourceClient<Shop> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity::<ShopError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => match id.parse() {
                Ok(id) => ShopError::NotFound(id),
                Err(_) => ShopError::StoreUnavailable(format!("unknown shop id {id}")),
            },
            Err(other) => ShopError::StoreUnavailable(other.to_string()),
        }
    }
}

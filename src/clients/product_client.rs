//! # Product Client
//!
//! Catalog management for shopkeepers and the stock operations the order actor uses.
//! Mutations are checked against the owning shop, which is why this client also holds
//! a [`ShopClient`].

use crate::auth::Shopkeeper;
use crate::clients::ShopClient;
use crate::guard::assert_owner;
use crate::model::{Product, ProductCreate, ProductId, ProductPatch, ShopId};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError, Reservation};
use crate::shop_actor::ShopError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
    shops: ShopClient,
}

impl From<ShopError> for ProductError {
    fn from(e: ShopError) -> Self {
        match e {
            ShopError::NotFound(id) => ProductError::ShopNotFound(id),
            ShopError::NotAuthorized(e) => ProductError::NotAuthorized(e),
            other => ProductError::StoreUnavailable(other.to_string()),
        }
    }
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>, shops: ShopClient) -> Self {
        Self { inner, shops }
    }

    /// Fetches a product, failing with [`ProductError::NotFound`] if it does not exist.
    pub async fn require(&self, id: ProductId) -> Result<Product, ProductError> {
        self.get(id).await?.ok_or(ProductError::NotFound(id))
    }

    /// Loads the product and checks `owner` owns its shop.
    async fn owned(&self, owner: &Shopkeeper, id: ProductId) -> Result<Product, ProductError> {
        let product = self.require(id).await?;
        let shop = self.shops.require(product.shop_id).await?;
        assert_owner(owner, &shop)?;
        Ok(product)
    }

    /// Adds a product to one of `owner`'s shops.
    ///
    /// The shop is checked again once the product exists: a `delete_shop` that ran in
    /// between cascaded before the product was stored, so the product is removed here.
    #[instrument(skip(self, params), fields(owner = %owner.id, shop = %params.shop_id))]
    pub async fn create_product(
        &self,
        owner: &Shopkeeper,
        params: ProductCreate,
    ) -> Result<Product, ProductError> {
        let shop_id = params.shop_id;
        let shop = self.shops.require(shop_id).await?;
        assert_owner(owner, &shop)?;
        let id = self.inner.create(params).await.map_err(Self::map_error)?;

        if self.shops.get(shop_id).await?.is_none() {
            warn!(product = %id, "Shop deleted during create, removing product");
            match self.inner.delete(id).await {
                Ok(()) | Err(FrameworkError::NotFound(_)) => {}
                Err(e) => warn!(product = %id, error = %e, "Orphan product removal failed"),
            }
            return Err(ProductError::ShopNotFound(shop_id));
        }

        info!(product = %id, "Product created");
        self.require(id).await
    }

    #[instrument(skip(self), fields(owner = %owner.id))]
    pub async fn update_product(
        &self,
        owner: &Shopkeeper,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, ProductError> {
        let product = self.owned(owner, id).await?;
        if patch.is_empty() {
            return Ok(product);
        }
        self.inner.update(id, patch).await.map_err(Self::map_error)
    }

    #[instrument(skip(self), fields(owner = %owner.id))]
    pub async fn delete_product(&self, owner: &Shopkeeper, id: ProductId) -> Result<(), ProductError> {
        self.owned(owner, id).await?;
        self.delete(id).await
    }

    /// The catalog of one shop, in creation order. Unknown shops have an empty catalog.
    #[instrument(skip(self))]
    pub async fn list_for_shop(&self, shop_id: ShopId) -> Result<Vec<Product>, ProductError> {
        self.find(move |p: &Product| p.shop_id == shop_id).await
    }

    /// Products with any of the given ids; missing ids are skipped.
    pub async fn by_ids(&self, ids: Vec<ProductId>) -> Result<Vec<Product>, ProductError> {
        self.find(move |p: &Product| ids.contains(&p.id)).await
    }

    /// Check the current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<f64, ProductError> {
        match self.action(id, ProductAction::CheckStock).await? {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Atomically takes `quantity` out of stock and returns the unit price at that moment.
    #[instrument(skip(self))]
    pub async fn reserve(&self, id: ProductId, quantity: f64) -> Result<Reservation, ProductError> {
        debug!("Reserving stock");
        match self.action(id, ProductAction::Reserve(quantity)).await? {
            ProductActionResult::Reserve(reservation) => Ok(reservation),
            other => Err(unexpected(other)),
        }
    }

    /// Returns `quantity` to stock. Yields the new stock level.
    #[instrument(skip(self))]
    pub async fn release(&self, id: ProductId, quantity: f64) -> Result<f64, ProductError> {
        debug!("Releasing stock");
        match self.action(id, ProductAction::Release(quantity)).await? {
            ProductActionResult::Release(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    async fn action(&self, id: ProductId, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::StoreUnavailable(format!("unexpected action result {result:?}"))
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity::<ProductError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => match id.parse() {
                Ok(id) => ProductError::NotFound(id),
                Err(_) => ProductError::StoreUnavailable(format!("unknown product id {id}")),
            },
            Err(other) => ProductError::StoreUnavailable(other.to_string()),
        }
    }
}

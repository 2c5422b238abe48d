//! # ActorClient Trait
//!
//! Common interface for resource-specific clients, adding default `get`, `delete`
//! and `find` methods on top of a generic `ResourceClient`.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard CRUD operations.
///
/// # Example
///
/// ```rust
/// use actor_framework::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Shop { id: u32, name: String }
/// #[derive(Debug)] struct ShopCreate;
/// #[derive(Debug)] struct ShopUpdate;
/// #[derive(Debug)] enum ShopAction {}
/// #[derive(Debug)] struct ShopError(String);
///
/// impl std::fmt::Display for ShopError {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "{}", self.0)
///     }
/// }
/// impl std::error::Error for ShopError {}
///
/// #[async_trait]
/// impl ActorEntity for Shop {
///     type Id = u32;
///     type Create = ShopCreate;
///     type Update = ShopUpdate;
///     type Action = ShopAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = ShopError;
///
///     fn from_create_params(id: u32, _: ShopCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, name: String::new() })
///     }
///     async fn on_update(&mut self, _: ShopUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: ShopAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct ShopClient {
///     inner: ResourceClient<Shop>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Shop> for ShopClient {
///     type Error = ShopError;
///
///     fn inner(&self) -> &ResourceClient<Shop> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         ShopError(e.to_string())
///     }
/// }
///
/// async fn usage(client: ShopClient) {
///     // get(), delete() and find() are provided automatically
///     let _ = client.get(1).await;
///     let _ = client.find(|shop| shop.name.is_empty()).await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity matching `filter`, in ascending id order.
    async fn find<F>(&self, filter: F) -> Result<Vec<T>, Self::Error>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.inner().list(filter).await.map_err(Self::map_error)
    }
}

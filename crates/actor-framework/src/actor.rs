//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns every record of one
//! entity type. It is the "server" half of the actor model: it processes messages
//! sequentially, so each request sees and mutates the store without locks.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// `ResourceActor<T>` owns the in-memory store for `T: ActorEntity` and handles every
/// `ResourceRequest<T>` one at a time inside its own Tokio task. A single request,
/// including any awaits inside its hooks, completes before the next one starts; this is
/// what makes check-and-decrement style actions atomic per record.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Shop { id: u32 }
/// #[derive(Debug)] struct ShopCreate;
/// #[derive(Debug)] struct ShopUpdate;
/// #[derive(Debug)] enum ShopAction {}
/// #[derive(Debug)] struct ShopError(String);
///
/// impl std::fmt::Display for ShopError {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
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
///     fn from_create_params(id: u32, _: ShopCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: ShopUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: ShopAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Shop>::new(10);
///     tokio::spawn(actor.run(()));
///     let id = client.create(ShopCreate).await.unwrap();
///     assert_eq!(client.list(|_| true).await.unwrap().len(), 1);
///     client.delete(id).await.unwrap();
/// }
/// ```
///
/// # Implementation Details
///
/// Records live in a `BTreeMap` keyed by id, so listings are returned in ascending id
/// order. Ids come from a `u32` counter. Unique keys declared by
/// [`ActorEntity::unique_key`] are tracked in a side index.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    unique: HashMap<String, T::Id>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            unique: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// The `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = entity_type::<T>();
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let _ = respond_to.send(self.create(params, &context).await);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let _ = respond_to.send(self.update(id, update, &context).await);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let _ = respond_to.send(self.delete(id, &context).await);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let _ = respond_to.send(self.action(id, action, &context).await);
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| filter(item))
                        .cloned()
                        .collect();
                    debug!(entity_type, matched = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::DeleteWhere { filter, respond_to } => {
                    let removed = self.delete_where(filter, &context).await;
                    info!(entity_type, removed, size = self.store.len(), "DeleteWhere");
                    let _ = respond_to.send(Ok(removed));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let entity_type = entity_type::<T>();
        let id = T::Id::from(self.next_id);
        self.next_id += 1;

        let mut item = T::from_create_params(id.clone(), params).map_err(|e| {
            warn!(entity_type, error = %e, "Create failed");
            FrameworkError::EntityError(Box::new(e))
        })?;

        let key = item.unique_key();
        if let Some(key) = &key {
            if let Some(existing) = self.unique.get(key) {
                warn!(entity_type, %existing, "Unique key taken");
                return Err(FrameworkError::Conflict {
                    key: key.clone(),
                    existing: existing.to_string(),
                });
            }
        }

        if let Err(e) = item.on_create(context).await {
            warn!(entity_type, error = %e, "on_create failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }

        if let Some(key) = key {
            self.unique.insert(key, id.clone());
        }
        self.store.insert(id.clone(), item);
        info!(entity_type, %id, size = self.store.len(), "Created");
        Ok(id)
    }

    async fn update(
        &mut self,
        id: T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let entity_type = entity_type::<T>();
        let Some(item) = self.store.get_mut(&id) else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        if let Err(e) = item.on_update(update, context).await {
            warn!(entity_type, %id, error = %e, "Update failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }
        info!(entity_type, %id, "Updated");
        Ok(item.clone())
    }

    async fn delete(&mut self, id: T::Id, context: &T::Context) -> Result<(), FrameworkError> {
        let entity_type = entity_type::<T>();
        let Some(item) = self.store.get(&id) else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        if let Err(e) = item.on_delete(context).await {
            warn!(entity_type, %id, error = %e, "on_delete failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }
        self.remove(&id);
        info!(entity_type, %id, size = self.store.len(), "Deleted");
        Ok(())
    }

    async fn action(
        &mut self,
        id: T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let entity_type = entity_type::<T>();
        let Some(item) = self.store.get_mut(&id) else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        let result = item
            .handle_action(action, context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
        match &result {
            Ok(_) => info!(entity_type, %id, "Action ok"),
            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
        }
        result
    }

    async fn delete_where(&mut self, filter: Filter<T>, context: &T::Context) -> usize {
        let entity_type = entity_type::<T>();
        let matching: Vec<T::Id> = self
            .store
            .iter()
            .filter(|(_, item)| filter(item))
            .map(|(id, _)| id.clone())
            .collect();

        let mut removed = 0;
        for id in matching {
            let Some(item) = self.store.get(&id) else {
                continue;
            };
            if let Err(e) = item.on_delete(context).await {
                warn!(entity_type, %id, error = %e, "on_delete failed, record kept");
                continue;
            }
            self.remove(&id);
            removed += 1;
        }
        removed
    }

    fn remove(&mut self, id: &T::Id) {
        if let Some(item) = self.store.remove(id) {
            if let Some(key) = item.unique_key() {
                self.unique.remove(&key);
            }
        }
    }
}

/// Short type name (e.g. "Shop" instead of "dokan::model::shop::Shop") for log fields.
fn entity_type<T>() -> &'static str {
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}

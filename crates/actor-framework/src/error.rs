//! # Framework Errors
//!
//! Common error types shared by every actor and client. Entity-specific failures
//! raised inside lifecycle hooks travel boxed in [`FrameworkError::EntityError`] and
//! can be recovered with [`FrameworkError::into_entity`].

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    /// A record with the same unique key already exists.
    #[error("Unique key already taken: {key} (held by {existing})")]
    Conflict { key: String, existing: String },
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the typed entity error raised by a lifecycle hook.
    ///
    /// Returns `Err(self)` unchanged when this is not an [`FrameworkError::EntityError`]
    /// or the boxed error is of a different type.
    pub fn into_entity<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

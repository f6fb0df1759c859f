use crate::models::{NewProperty, Property, PropertyId, PropertyUpdate};
use async_trait::async_trait;

/// Failure reported by a listing store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("property {0} not found")]
    NotFound(PropertyId),
    #[error("rejected by store: {0}")]
    Rejected(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for property listings.
/// Callers validate input before it reaches the store.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// All listings, newest first
    async fn list(&self) -> StoreResult<Vec<Property>>;

    /// Persist a listing, assigning its id and creation time
    async fn create(&self, new: NewProperty) -> StoreResult<Property>;

    /// Apply a partial update and return the stored result
    async fn update(&self, id: PropertyId, update: PropertyUpdate) -> StoreResult<Property>;

    /// Remove a listing. Returns whether a record existed.
    async fn delete(&self, id: PropertyId) -> StoreResult<bool>;

    /// Get the name of the storage backend
    fn name(&self) -> &'static str;
}

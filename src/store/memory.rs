use crate::models::{NewProperty, Property, PropertyId, PropertyUpdate};
use crate::store::traits::{PropertyStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

/// Process-local store for tests and running without MongoDB.
/// Records are kept in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Property>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PropertyStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Property>> {
        let records = self.records.read().await;
        let mut listed: Vec<Property> = records.iter().rev().cloned().collect();
        // stable sort keeps later inserts first among equal timestamps
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }

    async fn create(&self, new: NewProperty) -> StoreResult<Property> {
        let property = Property::from_new(PropertyId::new(), new, Utc::now());
        self.records.write().await.push(property.clone());
        debug!("Stored property {} in memory", property.id);
        Ok(property)
    }

    async fn update(&self, id: PropertyId, update: PropertyUpdate) -> StoreResult<Property> {
        let mut records = self.records.write().await;
        let property = records
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        update.apply_to(property);
        Ok(property.clone())
    }

    async fn delete(&self, id: PropertyId) -> StoreResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|p| p.id != id);
        Ok(records.len() != before)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

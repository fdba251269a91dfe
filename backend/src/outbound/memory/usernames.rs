use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::ports::{UsernameRepository, UsernameRepositoryError};
use crate::domain::{Handle, OwnerId, UsernameRecord};

#[derive(Debug, Default)]
struct Tables {
    by_owner: HashMap<OwnerId, Handle>,
    by_handle: HashMap<Handle, OwnerId>,
}

/// In-memory [`UsernameRepository`] keeping both directions of the mapping.
#[derive(Debug, Default)]
pub struct InMemoryUsernameRepository {
    tables: RwLock<Tables>,
}

impl InMemoryUsernameRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UsernameRepository for InMemoryUsernameRepository {
    async fn find_owner(
        &self,
        handle: &Handle,
    ) -> Result<Option<OwnerId>, UsernameRepositoryError> {
        Ok(self.tables.read().by_handle.get(handle).cloned())
    }

    async fn find_handle(
        &self,
        owner_id: &OwnerId,
    ) -> Result<Option<Handle>, UsernameRepositoryError> {
        Ok(self.tables.read().by_owner.get(owner_id).cloned())
    }

    async fn insert(&self, record: &UsernameRecord) -> Result<(), UsernameRepositoryError> {
        let mut tables = self.tables.write();
        if tables.by_handle.contains_key(&record.handle) {
            return Err(UsernameRepositoryError::duplicate_handle(record.handle.as_ref()));
        }
        if tables.by_owner.contains_key(&record.owner_id) {
            return Err(UsernameRepositoryError::duplicate_owner(record.owner_id.as_ref()));
        }
        tables
            .by_owner
            .insert(record.owner_id.clone(), record.handle.clone());
        tables
            .by_handle
            .insert(record.handle.clone(), record.owner_id.clone());
        Ok(())
    }

    async fn update_handle(
        &self,
        record: &UsernameRecord,
    ) -> Result<bool, UsernameRepositoryError> {
        let mut tables = self.tables.write();
        match tables.by_handle.get(&record.handle) {
            Some(holder) if holder == &record.owner_id => return Ok(true),
            Some(_) => {
                return Err(UsernameRepositoryError::duplicate_handle(record.handle.as_ref()));
            }
            None => {}
        }
        let Some(previous) = tables.by_owner.get(&record.owner_id).cloned() else {
            return Ok(false);
        };
        tables.by_handle.remove(&previous);
        tables
            .by_owner
            .insert(record.owner_id.clone(), record.handle.clone());
        tables
            .by_handle
            .insert(record.handle.clone(), record.owner_id.clone());
        Ok(true)
    }
}

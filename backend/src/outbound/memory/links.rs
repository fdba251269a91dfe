use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::ports::{LinkRepository, LinkRepositoryError};
use crate::domain::{
    LinkId, LinkRecord, LinkTitle, LinkUrl, OrderKey, OwnerId, is_owned_by, sort_for_display,
};

/// In-memory [`LinkRepository`] keyed by link id.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    records: RwLock<HashMap<LinkId, LinkRecord>>,
}

impl InMemoryLinkRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_owned<T>(
        &self,
        owner_id: &OwnerId,
        id: &LinkId,
        apply: impl FnOnce(&mut HashMap<LinkId, LinkRecord>) -> T,
    ) -> Option<T> {
        let mut records = self.records.write();
        let owned = records
            .get(id)
            .is_some_and(|record| is_owned_by(record, owner_id));
        owned.then(|| apply(&mut records))
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn list_by_owner(
        &self,
        owner_id: &OwnerId,
    ) -> Result<Vec<LinkRecord>, LinkRepositoryError> {
        let mut owned: Vec<LinkRecord> = self
            .records
            .read()
            .values()
            .filter(|record| is_owned_by(*record, owner_id))
            .cloned()
            .collect();
        sort_for_display(&mut owned);
        Ok(owned)
    }

    async fn find_by_id(&self, id: &LinkId) -> Result<Option<LinkRecord>, LinkRepositoryError> {
        Ok(self.records.read().get(id).cloned())
    }

    async fn insert(&self, record: &LinkRecord) -> Result<OrderKey, LinkRepositoryError> {
        let mut records = self.records.write();
        if records.contains_key(&record.id) {
            return Err(LinkRepositoryError::duplicate_id(record.id.as_ref()));
        }
        let highest = records
            .values()
            .filter(|existing| is_owned_by(*existing, &record.owner_id))
            .map(|existing| existing.order)
            .max();
        let mut stored = record.clone();
        stored.order = record.order.placed_after(highest);
        let order = stored.order;
        records.insert(stored.id.clone(), stored);
        Ok(order)
    }

    async fn update_content(
        &self,
        owner_id: &OwnerId,
        id: &LinkId,
        title: &LinkTitle,
        url: &LinkUrl,
    ) -> Result<bool, LinkRepositoryError> {
        Ok(self
            .with_owned(owner_id, id, |records| {
                if let Some(record) = records.get_mut(id) {
                    record.title = title.clone();
                    record.url = url.clone();
                }
            })
            .is_some())
    }

    async fn set_order(
        &self,
        owner_id: &OwnerId,
        id: &LinkId,
        order: OrderKey,
    ) -> Result<bool, LinkRepositoryError> {
        Ok(self
            .with_owned(owner_id, id, |records| {
                if let Some(record) = records.get_mut(id) {
                    record.order = order;
                }
            })
            .is_some())
    }

    async fn delete(&self, owner_id: &OwnerId, id: &LinkId) -> Result<bool, LinkRepositoryError> {
        Ok(self
            .with_owned(owner_id, id, |records| records.remove(id))
            .is_some())
    }

    async fn count_by_owner(&self, owner_id: &OwnerId) -> Result<u64, LinkRepositoryError> {
        let count = self
            .records
            .read()
            .values()
            .filter(|record| is_owned_by(*record, owner_id))
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }
}

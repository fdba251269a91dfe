use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::ports::{CustomizationRepository, CustomizationRepositoryError};
use crate::domain::{OwnerId, ProfileCustomization};

/// In-memory [`CustomizationRepository`].
#[derive(Debug, Default)]
pub struct InMemoryCustomizationRepository {
    records: RwLock<HashMap<OwnerId, ProfileCustomization>>,
}

impl InMemoryCustomizationRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomizationRepository for InMemoryCustomizationRepository {
    async fn find_by_owner(
        &self,
        owner_id: &OwnerId,
    ) -> Result<Option<ProfileCustomization>, CustomizationRepositoryError> {
        Ok(self.records.read().get(owner_id).cloned())
    }

    async fn upsert(
        &self,
        customization: &ProfileCustomization,
    ) -> Result<(), CustomizationRepositoryError> {
        self.records
            .write()
            .insert(customization.owner_id.clone(), customization.clone());
        Ok(())
    }
}

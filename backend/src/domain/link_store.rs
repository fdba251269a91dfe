//! Owner-scoped link collection.
//!
//! Every mutation is checked against the stored record's owner before the
//! repository is touched, and the repository only applies writes whose id
//! and owner both match.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{LinkDraft, LinkRepository, LinkRepositoryError};
use crate::domain::{Error, LinkId, LinkRecord, OrderKey, OwnerId, is_owned_by};

const LINK_NOT_FOUND: &str = "link not found";
const LINK_FORBIDDEN: &str = "not permitted to modify this link";

/// Link storage guarded by ownership checks.
#[derive(Clone)]
pub struct LinkStore<L> {
    repo: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<L> LinkStore<L> {
    /// Create a store over the given repository and clock.
    pub fn new(repo: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

pub(crate) fn map_link_repository_error(error: LinkRepositoryError) -> Error {
    match error {
        LinkRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("link repository unavailable: {message}"))
        }
        LinkRepositoryError::Query { message } => {
            Error::internal(format!("link repository error: {message}"))
        }
        LinkRepositoryError::DuplicateId { id } => {
            Error::internal(format!("generated link id collided: {id}"))
        }
    }
}

impl<L> LinkStore<L>
where
    L: LinkRepository,
{
    /// The owner's links in display order.
    pub async fn list_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<LinkRecord>, Error> {
        self.repo
            .list_by_owner(owner_id)
            .await
            .map_err(map_link_repository_error)
    }

    /// Number of links the owner holds.
    pub async fn count_by_owner(&self, owner_id: &OwnerId) -> Result<u64, Error> {
        self.repo
            .count_by_owner(owner_id)
            .await
            .map_err(map_link_repository_error)
    }

    /// Whether the owner holds at least one link.
    pub async fn has_links(&self, owner_id: &OwnerId) -> Result<bool, Error> {
        Ok(self.count_by_owner(owner_id).await? > 0)
    }

    /// Create a link at the end of the recency order.
    pub async fn create(&self, owner_id: &OwnerId, draft: LinkDraft) -> Result<LinkRecord, Error> {
        let mut record = LinkRecord {
            id: LinkId::generate(),
            owner_id: owner_id.clone(),
            title: draft.title,
            url: draft.url,
            order: OrderKey::recency(self.clock.utc()),
        };
        record.order = self
            .repo
            .insert(&record)
            .await
            .map_err(map_link_repository_error)?;
        info!(owner_id = %owner_id, link_id = %record.id, "link created");
        Ok(record)
    }

    /// Fetch one of the caller's links.
    pub async fn get(&self, caller: &OwnerId, id: &LinkId) -> Result<LinkRecord, Error> {
        self.fetch_owned(caller, id).await
    }

    /// Overwrite title and URL; the order key is untouched.
    pub async fn update(&self, caller: &OwnerId, id: &LinkId, draft: LinkDraft) -> Result<(), Error> {
        self.fetch_owned(caller, id).await?;
        let updated = self
            .repo
            .update_content(caller, id, &draft.title, &draft.url)
            .await
            .map_err(map_link_repository_error)?;
        if !updated {
            return Err(Error::not_found(LINK_NOT_FOUND));
        }
        debug!(owner_id = %caller, link_id = %id, "link updated");
        Ok(())
    }

    /// Delete one of the caller's links.
    pub async fn delete(&self, caller: &OwnerId, id: &LinkId) -> Result<(), Error> {
        self.fetch_owned(caller, id).await?;
        let deleted = self
            .repo
            .delete(caller, id)
            .await
            .map_err(map_link_repository_error)?;
        if !deleted {
            return Err(Error::not_found(LINK_NOT_FOUND));
        }
        info!(owner_id = %caller, link_id = %id, "link deleted");
        Ok(())
    }

    async fn fetch_owned(&self, caller: &OwnerId, id: &LinkId) -> Result<LinkRecord, Error> {
        let record = self
            .repo
            .find_by_id(id)
            .await
            .map_err(map_link_repository_error)?
            .ok_or_else(|| Error::not_found(LINK_NOT_FOUND))?;
        if !is_owned_by(&record, caller) {
            return Err(Error::forbidden(LINK_FORBIDDEN));
        }
        Ok(record)
    }
}

//! Port for link record storage.
//!
//! Every mutation is a single-record operation scoped to an owner: adapters
//! only touch a row when both the id and the owner match, and report whether
//! a row was affected. No operation spans several records.

use async_trait::async_trait;

use crate::domain::{LinkId, LinkRecord, LinkTitle, LinkUrl, OrderKey, OwnerId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by link repository adapters.
    pub enum LinkRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "link repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "link repository query failed: {message}",
        /// A record with the same id already exists.
        DuplicateId { id: String } =>
            "link id already exists: {id}",
    }
}

/// Port for per-owner link collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Snapshot of the owner's links in display order (`order`, then `id`).
    async fn list_by_owner(&self, owner_id: &OwnerId)
    -> Result<Vec<LinkRecord>, LinkRepositoryError>;

    /// Look a link up by id regardless of owner.
    async fn find_by_id(&self, id: &LinkId) -> Result<Option<LinkRecord>, LinkRepositoryError>;

    /// Store a new link after every link the owner already holds.
    ///
    /// The stored key is `record.order` raised past the owner's highest key
    /// (see [`OrderKey::placed_after`]); it is returned so callers can report
    /// the record as stored.
    async fn insert(&self, record: &LinkRecord) -> Result<OrderKey, LinkRepositoryError>;

    /// Overwrite title and URL, leaving the order key untouched.
    async fn update_content(
        &self,
        owner_id: &OwnerId,
        id: &LinkId,
        title: &LinkTitle,
        url: &LinkUrl,
    ) -> Result<bool, LinkRepositoryError>;

    /// Overwrite the order key.
    async fn set_order(
        &self,
        owner_id: &OwnerId,
        id: &LinkId,
        order: OrderKey,
    ) -> Result<bool, LinkRepositoryError>;

    /// Remove the link permanently.
    async fn delete(&self, owner_id: &OwnerId, id: &LinkId) -> Result<bool, LinkRepositoryError>;

    /// Number of links the owner holds.
    async fn count_by_owner(&self, owner_id: &OwnerId) -> Result<u64, LinkRepositoryError>;
}

//! Port for handle ↔ owner bindings.
//!
//! Adapters must reject a second owner claiming the same handle and a second
//! record for the same owner. Those rejections are the authoritative
//! uniqueness check; the domain's own lookup only narrows the race window.

use async_trait::async_trait;

use crate::domain::{Handle, OwnerId, UsernameRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by username repository adapters.
    pub enum UsernameRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "username repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "username repository query failed: {message}",
        /// Another owner already holds the handle.
        DuplicateHandle { handle: String } =>
            "handle already claimed: {handle}",
        /// The owner already has a record.
        DuplicateOwner { owner_id: String } =>
            "owner already has a handle: {owner_id}",
    }
}

/// Port for username record storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsernameRepository: Send + Sync {
    /// Owner holding `handle`, compared case-sensitively.
    async fn find_owner(&self, handle: &Handle) -> Result<Option<OwnerId>, UsernameRepositoryError>;

    /// Handle claimed by `owner_id`, if any.
    async fn find_handle(&self, owner_id: &OwnerId)
    -> Result<Option<Handle>, UsernameRepositoryError>;

    /// Insert a record for an owner that has none.
    ///
    /// Fails with [`UsernameRepositoryError::DuplicateHandle`] or
    /// [`UsernameRepositoryError::DuplicateOwner`] when either key is taken.
    async fn insert(&self, record: &UsernameRecord) -> Result<(), UsernameRepositoryError>;

    /// Replace the handle of the owner's existing record in place.
    ///
    /// Returns `false` when the owner has no record. Fails with
    /// [`UsernameRepositoryError::DuplicateHandle`] when another owner holds
    /// the new handle.
    async fn update_handle(&self, record: &UsernameRecord)
    -> Result<bool, UsernameRepositoryError>;
}

//! Port for profile customization storage.

use async_trait::async_trait;

use crate::domain::{OwnerId, ProfileCustomization};

use super::define_port_error;

define_port_error! {
    /// Errors raised by customization repository adapters.
    pub enum CustomizationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "customization repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "customization repository query failed: {message}",
    }
}

/// Port for one-record-per-owner presentation settings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomizationRepository: Send + Sync {
    /// Stored settings for the owner, if any were ever saved.
    async fn find_by_owner(
        &self,
        owner_id: &OwnerId,
    ) -> Result<Option<ProfileCustomization>, CustomizationRepositoryError>;

    /// Insert or replace the owner's settings.
    async fn upsert(
        &self,
        customization: &ProfileCustomization,
    ) -> Result<(), CustomizationRepositoryError>;
}

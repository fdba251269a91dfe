//! Handle ↔ owner registry.
//!
//! Answers handle lookups and enforces global uniqueness on claims. The
//! lookup before a write only gives a fast, friendly rejection; a concurrent
//! claim that slips past it is stopped by the repository's uniqueness
//! constraint and reported the same way.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{UsernameRepository, UsernameRepositoryError};
use crate::domain::{
    Error, HANDLE_TAKEN_MESSAGE, Handle, HandleAvailability, HandleValidationError, OwnerId,
    PublicSlug, UsernameRecord,
};

/// Registry of claimed handles.
#[derive(Clone)]
pub struct UsernameRegistry<U> {
    repo: Arc<U>,
}

impl<U> UsernameRegistry<U> {
    /// Create a registry over the given repository.
    pub fn new(repo: Arc<U>) -> Self {
        Self { repo }
    }
}

pub(crate) fn invalid_handle_error(error: HandleValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": "handle",
        "code": error.code(),
    }))
}

impl<U> UsernameRegistry<U>
where
    U: UsernameRepository,
{
    fn map_repository_error(error: UsernameRepositoryError) -> Error {
        match error {
            UsernameRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("username repository unavailable: {message}"))
            }
            UsernameRepositoryError::Query { message } => {
                Error::internal(format!("username repository error: {message}"))
            }
            UsernameRepositoryError::DuplicateHandle { .. } => {
                Error::conflict(HANDLE_TAKEN_MESSAGE).with_details(json!({
                    "field": "handle",
                    "code": "handle_taken",
                }))
            }
            UsernameRepositoryError::DuplicateOwner { owner_id } => {
                Error::internal(format!("duplicate username record for owner {owner_id}"))
            }
        }
    }

    /// Owner holding `handle`. No fallback to raw owner ids happens here.
    pub async fn resolve(&self, handle: &Handle) -> Result<Option<OwnerId>, Error> {
        self.repo
            .find_owner(handle)
            .await
            .map_err(Self::map_repository_error)
    }

    /// Handle claimed by `owner_id`, if any.
    pub async fn handle_of(&self, owner_id: &OwnerId) -> Result<Option<Handle>, Error> {
        self.repo
            .find_handle(owner_id)
            .await
            .map_err(Self::map_repository_error)
    }

    /// Public identity of `owner_id`: the handle, else the owner id itself.
    pub async fn get_handle(&self, owner_id: &OwnerId) -> Result<PublicSlug, Error> {
        Ok(match self.handle_of(owner_id).await? {
            Some(handle) => PublicSlug::Handle(handle),
            None => PublicSlug::OwnerId(owner_id.clone()),
        })
    }

    /// Check whether `candidate` can be claimed.
    ///
    /// Format and length are validated before any lookup. When `caller`
    /// already holds the candidate it is reported as current.
    pub async fn check_availability(
        &self,
        candidate: &str,
        caller: Option<&OwnerId>,
    ) -> Result<HandleAvailability, Error> {
        let handle = match Handle::new(candidate) {
            Ok(handle) => handle,
            Err(error) => return Ok(HandleAvailability::invalid(error)),
        };

        Ok(match self.resolve(&handle).await? {
            None => HandleAvailability::available(),
            Some(holder) if Some(&holder) == caller => HandleAvailability::current(),
            Some(_) => HandleAvailability::taken(),
        })
    }

    /// Claim `candidate` for `owner_id`.
    ///
    /// An existing record is updated in place; otherwise one is inserted.
    /// Claiming the handle the owner already holds writes nothing.
    pub async fn claim(&self, owner_id: &OwnerId, candidate: &str) -> Result<Handle, Error> {
        let handle = Handle::new(candidate).map_err(invalid_handle_error)?;

        match self.resolve(&handle).await? {
            Some(holder) if &holder == owner_id => {
                debug!(owner_id = %owner_id, handle = %handle, "handle already held by caller");
                return Ok(handle);
            }
            Some(_) => {
                return Err(Self::map_repository_error(
                    UsernameRepositoryError::duplicate_handle(handle.as_ref()),
                ));
            }
            None => {}
        }

        let record = UsernameRecord {
            owner_id: owner_id.clone(),
            handle,
        };
        if self.handle_of(owner_id).await?.is_some() {
            self.replace(&record).await?;
        } else {
            self.insert(&record).await?;
        }

        info!(owner_id = %owner_id, handle = %record.handle, "handle claimed");
        Ok(record.handle)
    }

    async fn replace(&self, record: &UsernameRecord) -> Result<(), Error> {
        let updated = self
            .repo
            .update_handle(record)
            .await
            .map_err(Self::map_repository_error)?;
        if updated {
            Ok(())
        } else {
            self.insert(record).await
        }
    }

    async fn insert(&self, record: &UsernameRecord) -> Result<(), Error> {
        match self.repo.insert(record).await {
            Ok(()) => Ok(()),
            // A concurrent first claim by the same owner won the insert.
            Err(UsernameRepositoryError::DuplicateOwner { .. }) => {
                let updated = self
                    .repo
                    .update_handle(record)
                    .await
                    .map_err(Self::map_repository_error)?;
                if updated {
                    Ok(())
                } else {
                    Err(Error::internal("username record vanished during claim"))
                }
            }
            Err(error) => Err(Self::map_repository_error(error)),
        }
    }
}

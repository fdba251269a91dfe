//! PostgreSQL-backed `UsernameRepository`.
//!
//! Uniqueness of both handle and owner is enforced by the table
//! constraints; violations come back as the matching duplicate error.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UsernameRepository, UsernameRepositoryError};
use crate::domain::{Handle, OwnerId, UsernameRecord};

use super::error_mapping::{DieselFailure, classify};
use super::models::{NewUsernameRow, UsernameRow};
use super::pool::{DbPool, PoolError};
use super::schema::usernames;

const HANDLE_CONSTRAINT: &str = "usernames_handle_key";

/// Diesel implementation of [`UsernameRepository`].
#[derive(Clone)]
pub struct DieselUsernameRepository {
    pool: DbPool,
}

impl DieselUsernameRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UsernameRepositoryError {
    UsernameRepositoryError::connection(error.into_message())
}

fn map_diesel_error(
    error: diesel::result::Error,
    record: Option<&UsernameRecord>,
) -> UsernameRepositoryError {
    match (classify(&error), record) {
        (DieselFailure::UniqueViolation { constraint }, Some(record)) => {
            if constraint.as_deref() == Some(HANDLE_CONSTRAINT) {
                UsernameRepositoryError::duplicate_handle(record.handle.as_ref())
            } else {
                UsernameRepositoryError::duplicate_owner(record.owner_id.as_ref())
            }
        }
        (DieselFailure::UniqueViolation { .. }, None) => {
            UsernameRepositoryError::query("unexpected unique violation")
        }
        (DieselFailure::Connection, _) => {
            UsernameRepositoryError::connection("database connection error")
        }
        (DieselFailure::Query(message), _) => UsernameRepositoryError::query(message),
    }
}

fn row_to_record(row: UsernameRow) -> Result<UsernameRecord, UsernameRepositoryError> {
    let owner_id = OwnerId::new(row.owner_id)
        .map_err(|err| UsernameRepositoryError::query(format!("stored owner id invalid: {err}")))?;
    let handle = Handle::new(row.handle)
        .map_err(|err| UsernameRepositoryError::query(format!("stored handle invalid: {err}")))?;
    Ok(UsernameRecord { owner_id, handle })
}

#[async_trait]
impl UsernameRepository for DieselUsernameRepository {
    async fn find_owner(
        &self,
        handle: &Handle,
    ) -> Result<Option<OwnerId>, UsernameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UsernameRow> = usernames::table
            .filter(usernames::handle.eq(handle.as_ref()))
            .select(UsernameRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(row_to_record)
            .transpose()
            .map(|record| record.map(|found| found.owner_id))
    }

    async fn find_handle(
        &self,
        owner_id: &OwnerId,
    ) -> Result<Option<Handle>, UsernameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UsernameRow> = usernames::table
            .filter(usernames::owner_id.eq(owner_id.as_ref()))
            .select(UsernameRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(row_to_record)
            .transpose()
            .map(|record| record.map(|found| found.handle))
    }

    async fn insert(&self, record: &UsernameRecord) -> Result<(), UsernameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUsernameRow {
            owner_id: record.owner_id.as_ref(),
            handle: record.handle.as_ref(),
        };
        diesel::insert_into(usernames::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, Some(record)))
    }

    async fn update_handle(
        &self,
        record: &UsernameRecord,
    ) -> Result<bool, UsernameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = usernames::table.filter(usernames::owner_id.eq(record.owner_id.as_ref()));
        let affected = diesel::update(target)
            .set((
                usernames::handle.eq(record.handle.as_ref()),
                usernames::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(record)))?;
        Ok(affected > 0)
    }
}

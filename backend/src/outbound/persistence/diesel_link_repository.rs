//! PostgreSQL-backed `LinkRepository`.
//!
//! Mutations filter on both `id` and `owner_id`, so a write aimed at
//! someone else's link affects no rows.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LinkRepository, LinkRepositoryError};
use crate::domain::{
    LinkId, LinkRecord, LinkTitle, LinkUrl, OrderKey, OwnerId, sort_for_display,
};

use super::error_mapping::{DieselFailure, classify};
use super::models::{LinkContentUpdate, LinkRow};
use super::pool::{DbPool, PoolError};
use super::schema::links;

/// Inserts a link keyed past the owner's highest `sort_order`.
///
/// The aggregate always yields one row, so an owner's first link keeps the
/// requested key.
const INSERT_AFTER_NEWEST_SQL: &str = "\
INSERT INTO links (id, owner_id, title, url, sort_order) \
SELECT $1, $2, $3, $4, GREATEST($5, COALESCE(MAX(sort_order) + 1, $5)) \
FROM links WHERE owner_id = $2 \
RETURNING sort_order";

#[derive(QueryableByName)]
struct StoredOrder {
    #[diesel(sql_type = BigInt)]
    sort_order: i64,
}

/// Diesel implementation of [`LinkRepository`].
#[derive(Clone)]
pub struct DieselLinkRepository {
    pool: DbPool,
}

impl DieselLinkRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LinkRepositoryError {
    LinkRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> LinkRepositoryError {
    match classify(&error) {
        DieselFailure::Connection => LinkRepositoryError::connection("database connection error"),
        DieselFailure::UniqueViolation { .. } => LinkRepositoryError::duplicate_id("links_pkey"),
        DieselFailure::Query(message) => LinkRepositoryError::query(message),
    }
}

fn row_to_record(row: LinkRow) -> Result<LinkRecord, LinkRepositoryError> {
    let corrupt = |field: &str, err: &dyn std::fmt::Display| {
        LinkRepositoryError::query(format!("stored link {field} invalid: {err}"))
    };
    Ok(LinkRecord {
        id: LinkId::new(row.id).map_err(|err| corrupt("id", &err))?,
        owner_id: OwnerId::new(row.owner_id).map_err(|err| corrupt("owner", &err))?,
        title: LinkTitle::new(row.title).map_err(|err| corrupt("title", &err))?,
        url: LinkUrl::new(row.url).map_err(|err| corrupt("url", &err))?,
        order: OrderKey::new(row.sort_order),
    })
}

#[async_trait]
impl LinkRepository for DieselLinkRepository {
    async fn list_by_owner(
        &self,
        owner_id: &OwnerId,
    ) -> Result<Vec<LinkRecord>, LinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<LinkRow> = links::table
            .filter(links::owner_id.eq(owner_id.as_ref()))
            .order_by((links::sort_order.asc(), links::id.asc()))
            .select(LinkRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let mut records = rows
            .into_iter()
            .map(row_to_record)
            .collect::<Result<Vec<_>, _>>()?;
        // Database collation may order ids differently from byte order.
        sort_for_display(&mut records);
        Ok(records)
    }

    async fn find_by_id(&self, id: &LinkId) -> Result<Option<LinkRecord>, LinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<LinkRow> = links::table
            .filter(links::id.eq(id.as_ref()))
            .select(LinkRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_record).transpose()
    }

    async fn insert(&self, record: &LinkRecord) -> Result<OrderKey, LinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let stored: StoredOrder = sql_query(INSERT_AFTER_NEWEST_SQL)
            .bind::<Text, _>(record.id.as_ref())
            .bind::<Text, _>(record.owner_id.as_ref())
            .bind::<Text, _>(record.title.as_ref())
            .bind::<Text, _>(record.url.as_ref())
            .bind::<BigInt, _>(record.order.value())
            .get_result(&mut conn)
            .await
            .map_err(|err| match map_diesel_error(err) {
                LinkRepositoryError::DuplicateId { .. } => {
                    LinkRepositoryError::duplicate_id(record.id.as_ref())
                }
                other => other,
            })?;
        Ok(OrderKey::new(stored.sort_order))
    }

    async fn update_content(
        &self,
        owner_id: &OwnerId,
        id: &LinkId,
        title: &LinkTitle,
        url: &LinkUrl,
    ) -> Result<bool, LinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = links::table
            .filter(links::id.eq(id.as_ref()))
            .filter(links::owner_id.eq(owner_id.as_ref()));
        let affected = diesel::update(target)
            .set(&LinkContentUpdate {
                title: title.as_ref(),
                url: url.as_ref(),
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn set_order(
        &self,
        owner_id: &OwnerId,
        id: &LinkId,
        order: OrderKey,
    ) -> Result<bool, LinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = links::table
            .filter(links::id.eq(id.as_ref()))
            .filter(links::owner_id.eq(owner_id.as_ref()));
        let affected = diesel::update(target)
            .set(links::sort_order.eq(order.value()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, owner_id: &OwnerId, id: &LinkId) -> Result<bool, LinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = links::table
            .filter(links::id.eq(id.as_ref()))
            .filter(links::owner_id.eq(owner_id.as_ref()));
        let affected = diesel::delete(target)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn count_by_owner(&self, owner_id: &OwnerId) -> Result<u64, LinkRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = links::table
            .filter(links::owner_id.eq(owner_id.as_ref()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

//! PostgreSQL-backed `CustomizationRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CustomizationRepository, CustomizationRepositoryError};
use crate::domain::{AccentColor, OwnerId, ProfileCustomization, ProfileDescription};

use super::error_mapping::{DieselFailure, classify};
use super::models::{CustomizationRow, CustomizationUpsert};
use super::pool::{DbPool, PoolError};
use super::schema::profile_customizations;

/// Diesel implementation of [`CustomizationRepository`].
#[derive(Clone)]
pub struct DieselCustomizationRepository {
    pool: DbPool,
}

impl DieselCustomizationRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CustomizationRepositoryError {
    CustomizationRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> CustomizationRepositoryError {
    match classify(&error) {
        DieselFailure::Connection => {
            CustomizationRepositoryError::connection("database connection error")
        }
        DieselFailure::UniqueViolation { .. } => {
            CustomizationRepositoryError::query("concurrent customization insert")
        }
        DieselFailure::Query(message) => CustomizationRepositoryError::query(message),
    }
}

fn row_to_customization(
    row: CustomizationRow,
) -> Result<ProfileCustomization, CustomizationRepositoryError> {
    let corrupt = |err: &dyn std::fmt::Display| {
        CustomizationRepositoryError::query(format!("stored customization invalid: {err}"))
    };
    Ok(ProfileCustomization {
        owner_id: OwnerId::new(row.owner_id).map_err(|err| corrupt(&err))?,
        description: row
            .description
            .map(ProfileDescription::new)
            .transpose()
            .map_err(|err| corrupt(&err))?,
        accent_color: row
            .accent_color
            .map(AccentColor::new)
            .transpose()
            .map_err(|err| corrupt(&err))?,
    })
}

#[async_trait]
impl CustomizationRepository for DieselCustomizationRepository {
    async fn find_by_owner(
        &self,
        owner_id: &OwnerId,
    ) -> Result<Option<ProfileCustomization>, CustomizationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CustomizationRow> = profile_customizations::table
            .filter(profile_customizations::owner_id.eq(owner_id.as_ref()))
            .select(CustomizationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_customization).transpose()
    }

    async fn upsert(
        &self,
        customization: &ProfileCustomization,
    ) -> Result<(), CustomizationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = CustomizationUpsert {
            owner_id: customization.owner_id.as_ref(),
            description: customization.description.as_ref().map(AsRef::as_ref),
            accent_color: customization.accent_color.as_ref().map(AsRef::as_ref),
        };
        diesel::insert_into(profile_customizations::table)
            .values(&row)
            .on_conflict(profile_customizations::owner_id)
            .do_update()
            .set((
                profile_customizations::description
                    .eq(excluded(profile_customizations::description)),
                profile_customizations::accent_color
                    .eq(excluded(profile_customizations::accent_color)),
                profile_customizations::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn null_columns_read_as_unset() {
        let customization = row_to_customization(CustomizationRow {
            owner_id: "u1".to_owned(),
            description: None,
            accent_color: None,
        })
        .expect("valid row");
        assert_eq!(
            customization,
            ProfileCustomization::empty(OwnerId::new("u1").expect("valid owner id"))
        );
    }

    #[rstest]
    fn malformed_colour_is_a_query_error() {
        let error = row_to_customization(CustomizationRow {
            owner_id: "u1".to_owned(),
            description: None,
            accent_color: Some("red".to_owned()),
        })
        .expect_err("invalid colour");
        assert!(matches!(error, CustomizationRepositoryError::Query { .. }));
    }
}

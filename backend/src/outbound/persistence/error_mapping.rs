//! Shared classification of Diesel failures.
//!
//! Repositories turn a [`DieselFailure`] into their own port error; only the
//! username repository cares which unique constraint fired.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Coarse category of a failed Diesel call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection was lost mid-operation.
    Connection,
    /// A unique constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// Anything else; carries a message safe to surface.
    Query(&'static str),
}

/// Classify `error`, logging the database detail at debug level.
pub(crate) fn classify(error: &DieselError) -> DieselFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            match kind {
                DatabaseErrorKind::ClosedConnection => DieselFailure::Connection,
                DatabaseErrorKind::UniqueViolation => DieselFailure::UniqueViolation {
                    constraint: info.constraint_name().map(str::to_owned),
                },
                _ => DieselFailure::Query("database error"),
            }
        }
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        other => {
            debug!(
                error_type = %std::any::type_name_of_val(other),
                "diesel operation failed"
            );
            DieselFailure::Query("database error")
        }
    }
}

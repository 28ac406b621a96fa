//! Shared error classification for the Diesel-backed stores.
//!
//! Raw driver detail goes to debug logs only. Callers receive a stable,
//! non-sensitive message and a category to map onto their port error.

use tracing::debug;

use super::pool::PoolError;

/// Category of a failed database call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DieselFailure {
    /// The connection dropped or could not be used.
    Connection(&'static str),
    /// A unique constraint rejected a write.
    UniqueViolation,
    /// Any other statement failure.
    Query(&'static str),
}

/// Extract a readable message from a pool error.
pub fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Classify a Diesel error, logging the driver detail at debug level.
pub fn classify_diesel_error(error: &diesel::result::Error) -> DieselFailure {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DieselFailure::UniqueViolation
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error")
        }
        DieselError::DeserializationError(_) => DieselFailure::Query("unreadable row"),
        _ => DieselFailure::Query("database error"),
    }
}

//! Classification of `sqlx` errors into [`AppError`] kinds.
//!
//! This is the only place that inspects store-specific error codes. Callers
//! above the persistence layer see typed variants and may rewrite their
//! messages (see [`AppError::conflict_as`] and friends).

use crate::error::AppError;

/// Maps a database error to the matching [`AppError`] kind.
///
/// - `RowNotFound` → `NotFound`
/// - unique violation → `Conflict` (constraint name in the message)
/// - foreign key violation → `NotFound` (the referenced row is missing)
/// - check violation → `Validation`
/// - anything else → `Internal`, logged with full detail
pub fn classify(e: sqlx::Error) -> AppError {
    if matches!(e, sqlx::Error::RowNotFound) {
        return AppError::not_found("Record not found");
    }

    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::conflict(format!(
                "Unique constraint violation: {}",
                db.constraint().unwrap_or("unknown")
            ));
        }

        if db.is_foreign_key_violation() {
            return AppError::not_found("Referenced record not found");
        }

        if db.is_check_violation() {
            return AppError::bad_request(format!(
                "Check constraint violation: {}",
                db.constraint().unwrap_or("unknown")
            ));
        }
    }

    tracing::error!(error = %e, "Database error");
    AppError::internal("Database error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_is_not_found() {
        let err = classify(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn test_pool_errors_are_internal() {
        let err = classify(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(err.to_string(), "Database error");
    }
}

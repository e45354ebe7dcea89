use sqlx::error::DatabaseError;

use crate::error::Error;

const NOT_FOUND_IN_DATABASE: &str = "the resource could not be found in the database";
const ALREADY_EXISTS: &str = "this entry already existed in the database";

/// Postgres SQLSTATE for `unique_violation`
const UNIQUE_VIOLATION: &str = "23505";

enum StorageFailure {
    Missing,
    Duplicate,
    Rejected,
    Other,
}

impl StorageFailure {
    fn classify(err: &sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::Missing,
            sqlx::Error::Database(db) if is_unique_violation(db.as_ref()) => Self::Duplicate,
            sqlx::Error::Database(_) => Self::Rejected,
            _ => Self::Other,
        }
    }
}

fn is_unique_violation(db: &dyn DatabaseError) -> bool {
    db.is_unique_violation() || db.code().as_deref() == Some(UNIQUE_VIOLATION)
}

impl Error {
    /// Classify a storage error
    ///
    /// Missing rows map to not-found and unique-constraint violations to
    /// conflict. Anything else is an internal error; errors reported by the
    /// database server itself are dropped entirely so no SQL detail can
    /// travel further, while connection-level failures are kept as the
    /// cause for logging.
    pub fn database(err: sqlx::Error) -> Self {
        match StorageFailure::classify(&err) {
            StorageFailure::Missing => Self::not_found(NOT_FOUND_IN_DATABASE).with_cause(err),
            StorageFailure::Duplicate => Self::resource_conflict(ALREADY_EXISTS).with_cause(err),
            StorageFailure::Rejected => Self::internal(),
            StorageFailure::Other => Self::internal().with_cause(err),
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Self::database(err)
    }
}

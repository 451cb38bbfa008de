use crate::error::StoreError;

/// Name of the unique constraint on `url_shorteners.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "url_shorteners_short_code_key";

pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_CODE_CONSTRAINT))
}

/// Maps a SQLx error from an insert into a [`StoreError`].
///
/// A unique violation on the short code constraint becomes a retriable
/// collision; everything else is a transport failure.
pub fn map_insert_error(e: sqlx::Error, short_code: &str) -> StoreError {
    if is_unique_violation_on_code(&e) {
        return StoreError::UniqueConstraintViolation {
            short_code: short_code.to_string(),
        };
    }

    map_sqlx_error(e)
}

pub fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    if matches!(e, sqlx::Error::PoolTimedOut) {
        return StoreError::Transport("connection pool timed out".to_string());
    }

    if matches!(
        e,
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_)
    ) {
        return StoreError::Serialization(e.to_string());
    }

    StoreError::Transport(e.to_string())
}

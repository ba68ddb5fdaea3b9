pub mod sqlite_rows;
pub mod sqlite_experience_repo;
pub mod sqlite_slot_repo;
pub mod sqlite_promo_repo;
pub mod sqlite_booking_repo;

pub mod postgres_experience_repo;
pub mod postgres_slot_repo;
pub mod postgres_promo_repo;
pub mod postgres_booking_repo;

use crate::error::AppError;
use sqlx::{Database, Transaction};
use tracing::warn;

/// Maps store errors raised inside a reservation transaction onto the booking error kinds.
pub(crate) fn classify_tx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::PoolTimedOut => return AppError::Timeout,
        sqlx::Error::PoolClosed | sqlx::Error::Io(_) => return AppError::Unavailable,
        sqlx::Error::Database(db_err) => {
            if db_err.is_unique_violation() {
                return AppError::Conflict("Booking reference already in use".into());
            }
            match db_err.code().as_deref() {
                // 55P03 = PostgreSQL lock_not_available (lock_timeout)
                // 5, 6, 261, 517 = SQLite BUSY, LOCKED, BUSY_RECOVERY, BUSY_SNAPSHOT
                Some("55P03") | Some("5") | Some("6") | Some("261") | Some("517") => return AppError::Timeout,
                // 40001 = serialization_failure, 40P01 = deadlock_detected
                Some("40001") | Some("40P01") => return AppError::Conflict("Concurrent update on slot".into()),
                _ => {}
            }
        }
        _ => {}
    }
    AppError::Database(err)
}

pub(crate) async fn abort<DB: Database>(tx: Transaction<'_, DB>, err: AppError) -> AppError {
    if let Err(e) = tx.rollback().await {
        warn!("Rollback after '{}' failed: {}", err, e);
    }
    err
}

/// Case-insensitive substring pattern for `LOWER(col) LIKE ? ESCAPE '\'`.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.trim().to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(" Coorg "), "%coorg%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn test_pool_timeout_is_timeout() {
        assert!(matches!(classify_tx_error(sqlx::Error::PoolTimedOut), AppError::Timeout));
        assert!(matches!(classify_tx_error(sqlx::Error::PoolClosed), AppError::Unavailable));
        assert!(matches!(classify_tx_error(sqlx::Error::RowNotFound), AppError::Database(_)));
    }
}

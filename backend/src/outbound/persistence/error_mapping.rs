//! Translate pool and Diesel failures into [`RepositoryError`].
//!
//! Driver messages are logged at `debug` and replaced with fixed strings so
//! SQL fragments never reach callers.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

pub(crate) fn map_pool_error(error: PoolError) -> RepositoryError {
    debug!(%error, "connection checkout failed");
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    RepositoryError::connection(message)
}

pub(crate) fn map_diesel_error(error: DieselError) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            RepositoryError::connection("database connection error")
        }
        DieselError::NotFound => RepositoryError::query("record not found"),
        _ => RepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, RepositoryError::connection("timed out"));
    }

    #[rstest]
    #[case(DieselError::NotFound, RepositoryError::query("record not found"))]
    #[case(DieselError::RollbackTransaction, RepositoryError::query("database error"))]
    #[case(
        DieselError::BrokenTransactionManager,
        RepositoryError::connection("database connection error")
    )]
    fn diesel_errors_map_by_kind(#[case] error: DieselError, #[case] expected: RepositoryError) {
        assert_eq!(map_diesel_error(error), expected);
    }
}

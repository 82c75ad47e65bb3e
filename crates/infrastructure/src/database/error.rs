use domain::DomainError;
use sqlx::error::ErrorKind as SqlErrorKind;

/// Translate a driver error into the domain taxonomy.
pub(crate) fn db_error(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::RowNotFound => DomainError::not_found("Row", "requested"),
        sqlx::Error::Database(db) => match db.kind() {
            SqlErrorKind::UniqueViolation => DomainError::Conflict(db.message().to_string()),
            SqlErrorKind::ForeignKeyViolation
            | SqlErrorKind::NotNullViolation
            | SqlErrorKind::CheckViolation => {
                DomainError::ValidationFailed(db.message().to_string())
            }
            _ => DomainError::Internal(err.to_string()),
        },
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Configuration(_) => DomainError::ResourceUnavailable(err.to_string()),
        _ => DomainError::Internal(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::ErrorKind;

    #[test]
    fn test_pool_timeout_is_unavailable() {
        assert_eq!(
            db_error(sqlx::Error::PoolTimedOut).kind(),
            ErrorKind::ResourceUnavailable
        );
    }

    #[test]
    fn test_row_not_found() {
        assert_eq!(db_error(sqlx::Error::RowNotFound).kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_protocol_error_is_internal() {
        let err = db_error(sqlx::Error::Protocol("unexpected message".to_string()));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_io_error_is_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        assert_eq!(
            db_error(sqlx::Error::Io(io)).kind(),
            ErrorKind::ResourceUnavailable
        );
    }
}

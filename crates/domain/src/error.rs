use thiserror::Error;

/// Domain-level errors
///
/// Every failure that leaves a repository is one of these variants. Callers
/// that need to branch (the HTTP layer picking a status code, for instance)
/// should match on [`DomainError::kind`] instead of comparing messages.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Plant group {0} does not exist")]
    PlantGroupNotExisting(i64),

    #[error("Cannot delete plant group {0} because it is still in use")]
    PlantGroupStillInUse(i64),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("Database error: {0}")]
    Internal(String),
}

/// Closed taxonomy the outer layers dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    ValidationFailed,
    Conflict,
    ResourceUnavailable,
    Internal,
}

impl DomainError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationFailed(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::ValidationFailed(_) | Self::PlantGroupNotExisting(_) => {
                ErrorKind::ValidationFailed
            }
            Self::PlantGroupStillInUse(_) | Self::Conflict(_) => ErrorKind::Conflict,
            Self::ResourceUnavailable(_) => ErrorKind::ResourceUnavailable,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_plant_group_is_a_client_error() {
        let err = DomainError::PlantGroupNotExisting(999);
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(err.to_string(), "Plant group 999 does not exist");
    }

    #[test]
    fn test_group_in_use_is_a_conflict() {
        assert_eq!(
            DomainError::PlantGroupStillInUse(1).kind(),
            ErrorKind::Conflict
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = DomainError::not_found("Plant", 42);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Plant 42 not found");
    }

    #[test]
    fn test_kind_survives_clone() {
        let err = DomainError::ResourceUnavailable("session is not open".to_string());
        let copy = err.clone();
        assert_eq!(copy.kind(), ErrorKind::ResourceUnavailable);
        assert_eq!(copy, err);
    }
}

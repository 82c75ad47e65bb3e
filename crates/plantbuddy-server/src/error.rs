use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use domain::{DomainError, ErrorKind};
use serde_json::json;
use tracing::{error, warn};

/// Domain error on its way out of a handler
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

pub fn status_of(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::ResourceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_of(self.0.kind());
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        } else {
            warn!("Request rejected: {}", self.0);
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError(DomainError::PlantGroupNotExisting(3)).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(DomainError::PlantGroupStillInUse(3)).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError(DomainError::not_found("Plant", 1)).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ErrorKind::ResourceUnavailable),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(ErrorKind::Internal),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

//! Server Error Types
//!
//! Error types for the HTTP layer and their conversion to JSON responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::controller::ControllerError;

#[derive(Error, Debug)]
pub enum ServerError {
    /// Operation rejected by the dashboard controller
    #[error("Dashboard error: {0}")]
    Controller(#[from] ControllerError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ServerError::Controller(ControllerError::DetailDisabled) => {
                (StatusCode::NOT_FOUND, "DETAIL_DISABLED")
            }
            ServerError::Controller(ControllerError::UnknownReview(_)) => {
                (StatusCode::NOT_FOUND, "UNKNOWN_REVIEW")
            }
            ServerError::Controller(ControllerError::AlreadyPolling) => {
                (StatusCode::CONFLICT, "ALREADY_POLLING")
            }
            ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ServerError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        };

        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "Request failed"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for handlers
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_disabled_maps_to_not_found() {
        let response = ServerError::from(ControllerError::DetailDisabled).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unknown_review_maps_to_not_found() {
        let error = ServerError::from(ControllerError::UnknownReview(424242));
        assert_eq!(error.to_string(), "Dashboard error: review 424242 is not in the recent list");
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_error_status() {
        let response = ServerError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

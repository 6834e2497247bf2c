//! Mapping of service errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

use crate::description::DescriptionError;
use crate::services::ServiceError;
use crate::tools::ToolError;
use crate::upstream::UpstreamError;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// An error response: `{"error": "..."}` with a status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(message) => ApiError::bad_request(message),
            ServiceError::Link(e) => ApiError::bad_request(e.to_string()),
            ServiceError::NotFound(message) | ServiceError::Upstream(UpstreamError::NotFound(message)) => {
                ApiError {
                    status: StatusCode::NOT_FOUND,
                    message,
                }
            }
            ServiceError::Upstream(UpstreamError::Status { status: 404, service }) => ApiError {
                status: StatusCode::NOT_FOUND,
                message: format!("Not found on {}", service),
            },
            ServiceError::Upstream(e) => {
                warn!("Upstream failure: {}", e);
                ApiError {
                    status: StatusCode::BAD_GATEWAY,
                    message: e.to_string(),
                }
            }
        }
    }
}

impl From<DescriptionError> for ApiError {
    fn from(err: DescriptionError) -> Self {
        match err {
            DescriptionError::InvalidInput(message) => ApiError::bad_request(message),
        }
    }
}

impl From<ToolError> for ApiError {
    fn from(err: ToolError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

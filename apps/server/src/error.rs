//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use tubesum_core::{ErrorKind, TubesumError};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Upstream or configuration failure. Only `message` reaches the client.
    #[error("{message}: {source}")]
    Internal {
        message: &'static str,
        #[source]
        source: TubesumError,
    },
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Classify a core error. `failure_message` is what the client sees when
    /// the failure is on our side or upstream.
    pub fn from_core(err: TubesumError, failure_message: &'static str) -> Self {
        match err.kind() {
            ErrorKind::InvalidInput => Self::BadRequest(err.to_string()),
            ErrorKind::NotFound => Self::NotFound(err.to_string()),
            ErrorKind::Upstream | ErrorKind::Configuration => {
                error!(error = %err, "{}", failure_message);
                Self::Internal {
                    message: failure_message,
                    source: err,
                }
            }
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => msg.clone(),
            ApiError::Internal { message, .. } => message.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.public_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_status_codes() {
        let bad = ApiError::from_core(TubesumError::NoValidSegments, "unused");
        assert_eq!(bad.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(bad.public_message(), "No valid segments found in transcript");

        let missing = ApiError::from_core(
            TubesumError::TranscriptNotFound {
                video_id: "dQw4w9WgXcQ".into(),
            },
            "unused",
        );
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let upstream = ApiError::from_core(
            TubesumError::UpstreamStatus {
                service: "chat provider",
                status: 502,
                body: "secret upstream detail".into(),
            },
            "Failed to generate summary",
        );
        assert_eq!(upstream.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(upstream.public_message(), "Failed to generate summary");
    }
}

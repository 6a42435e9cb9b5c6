use thiserror::Error;

#[derive(Error, Debug)]
pub enum TubesumError {
    #[error("Invalid YouTube URL: {url}")]
    InvalidUrl { url: String },

    #[error("Invalid video ID: {video_id}")]
    InvalidVideoId { video_id: String },

    #[error("No valid segments found in transcript")]
    NoValidSegments,

    #[error("No transcript or auto-generated captions found for this video")]
    TranscriptNotFound { video_id: String },

    #[error("{service} returned HTTP {status}: {body}")]
    UpstreamStatus {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Invalid {service} response: {reason}")]
    InvalidResponse {
        service: &'static str,
        reason: String,
    },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },

    #[error("Invalid configuration for {key}: {reason}")]
    InvalidConfig { key: String, reason: String },
}

/// Coarse classification used to pick a user-facing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller sent something unusable. Never retried.
    InvalidInput,
    /// The upstream provider has nothing for this video.
    NotFound,
    /// Network failure or a malformed provider response.
    Upstream,
    /// Credentials or settings are missing or malformed.
    Configuration,
}

impl TubesumError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TubesumError::InvalidUrl { .. }
            | TubesumError::InvalidVideoId { .. }
            | TubesumError::NoValidSegments => ErrorKind::InvalidInput,
            TubesumError::TranscriptNotFound { .. } => ErrorKind::NotFound,
            TubesumError::UpstreamStatus { .. }
            | TubesumError::InvalidResponse { .. }
            | TubesumError::ApiError(_)
            | TubesumError::JsonError(_) => ErrorKind::Upstream,
            TubesumError::MissingApiKey { .. } | TubesumError::InvalidConfig { .. } => {
                ErrorKind::Configuration
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, TubesumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_the_error_taxonomy() {
        assert_eq!(TubesumError::NoValidSegments.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            TubesumError::TranscriptNotFound {
                video_id: "dQw4w9WgXcQ".into()
            }
            .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            TubesumError::InvalidResponse {
                service: "chat",
                reason: "no choices".into()
            }
            .kind(),
            ErrorKind::Upstream
        );
        assert_eq!(
            TubesumError::MissingApiKey {
                env_var: "RAPID_API_KEY".into()
            }
            .kind(),
            ErrorKind::Configuration
        );
    }

    #[test]
    fn no_valid_segments_message_is_user_facing() {
        assert_eq!(
            TubesumError::NoValidSegments.to_string(),
            "No valid segments found in transcript"
        );
    }
}

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, TubesumError};

/// Matches watch, short-link, embed, `/v/`, `/e/` and channel-path URL shapes.
static VIDEO_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .expect("video URL pattern is valid")
});

static VIDEO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[^"&?/\s]{11}$"#).expect("video ID pattern is valid"));

/// Pull the 11-character video ID out of a YouTube URL.
///
/// Returns `None` when the input doesn't look like any known YouTube URL shape.
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_URL_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Like [`extract_video_id`], but reports a miss as an input error.
pub fn require_video_id(url: &str) -> Result<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(TubesumError::InvalidUrl {
            url: url.to_string(),
        });
    }

    extract_video_id(trimmed).ok_or_else(|| TubesumError::InvalidUrl {
        url: trimmed.to_string(),
    })
}

/// Check a bare video ID, as received in an API path.
pub fn validate_video_id(video_id: &str) -> Result<&str> {
    if VIDEO_ID_RE.is_match(video_id) {
        Ok(video_id)
    } else {
        Err(TubesumError::InvalidVideoId {
            video_id: video_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_common_url_shapes() {
        let cases = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?t=42",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
            "https://www.youtube.com/e/dQw4w9WgXcQ",
            "youtube.com/watch?v=dQw4w9WgXcQ&list=PL123",
        ];
        for url in cases {
            assert_eq!(extract_video_id(url).as_deref(), Some("dQw4w9WgXcQ"), "{url}");
        }
    }

    #[test]
    fn rejects_non_youtube_input() {
        assert_eq!(extract_video_id("not a url"), None);
        assert_eq!(extract_video_id("https://vimeo.com/123456789"), None);
        assert_eq!(extract_video_id("https://youtu.be/short"), None);
    }

    #[test]
    fn require_reports_invalid_url() {
        assert!(matches!(
            require_video_id("   "),
            Err(TubesumError::InvalidUrl { .. })
        ));
        assert!(matches!(
            require_video_id("not a url"),
            Err(TubesumError::InvalidUrl { .. })
        ));
        assert_eq!(
            require_video_id(" https://youtu.be/dQw4w9WgXcQ ").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn validates_bare_ids() {
        assert!(validate_video_id("dQw4w9WgXcQ").is_ok());
        assert!(validate_video_id("a-b_c1234XY").is_ok());
        assert!(validate_video_id("tooshort").is_err());
        assert!(validate_video_id("dQw4w9WgXcQx").is_err());
        assert!(validate_video_id("dQw4w9Wg?cQ").is_err());
    }
}

//! Transcript retrieval from the RapidAPI YouTube transcript service.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    config::{ApiKey, Settings},
    error::{Result, TubesumError},
    types::{RawSegment, Transcript, TranscriptSegment},
};

const SERVICE: &str = "transcript provider";

#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the timed transcript for a video, or `TranscriptNotFound`.
    async fn fetch_transcript(&self, video_id: &str) -> Result<Transcript>;
}

/// Which flavour of captions to ask the provider for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptionMode {
    Regular,
    AutoGenerated,
}

pub struct TranscriptClient {
    http: reqwest::Client,
    api_url: String,
    api_host: String,
    api_key: ApiKey,
    fallback_lang: String,
    fallback_country: String,
}

impl TranscriptClient {
    /// Build a client from settings. Fails if `RAPID_API_KEY` is missing.
    pub fn new(settings: &Settings, http: reqwest::Client) -> Result<Self> {
        let api_key = settings.transcript_api_key()?.clone();
        let api_url = settings.transcript.api_url.clone();
        let api_host = reqwest::Url::parse(&api_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .ok_or_else(|| TubesumError::InvalidConfig {
                key: "TRANSCRIPT_API_URL".to_string(),
                reason: format!("'{api_url}' is not an absolute URL"),
            })?;

        Ok(Self {
            http,
            api_url,
            api_host,
            api_key,
            fallback_lang: settings.transcript.fallback_lang.clone(),
            fallback_country: settings.transcript.fallback_country.clone(),
        })
    }

    /// One provider call. `None` means the provider had no transcript to give.
    async fn request(&self, video_id: &str, mode: CaptionMode) -> Result<Option<Vec<RawSegment>>> {
        let mut query: Vec<(&str, &str)> = vec![("videoId", video_id)];
        if mode == CaptionMode::AutoGenerated {
            query.extend([
                ("lang", self.fallback_lang.as_str()),
                ("country", self.fallback_country.as_str()),
                ("auto", "true"),
            ]);
        }

        let response = self
            .http
            .get(&self.api_url)
            .query(&query)
            .header("X-RapidAPI-Key", self.api_key.expose())
            .header("X-RapidAPI-Host", &self.api_host)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TubesumError::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let body = response.json::<Value>().await?;
        Ok(transcript_items(&body))
    }
}

#[async_trait]
impl TranscriptSource for TranscriptClient {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Transcript> {
        info!(video_id, "Fetching transcript");

        let items = match self.request(video_id, CaptionMode::Regular).await? {
            Some(items) => items,
            None => {
                warn!(video_id, "No regular transcript found, trying auto-generated captions");
                self.request(video_id, CaptionMode::AutoGenerated)
                    .await?
                    .ok_or_else(|| TubesumError::TranscriptNotFound {
                        video_id: video_id.to_string(),
                    })?
            }
        };

        let transcript = normalize_transcript(&items);
        info!(
            video_id,
            segments = transcript.segments.len(),
            "Transcript fetched"
        );
        Ok(transcript)
    }
}

/// Read the `transcript` list out of a provider body. Absent, null, or empty
/// lists all count as "no transcript".
fn transcript_items(body: &Value) -> Option<Vec<RawSegment>> {
    let list = body.get("transcript")?.as_array()?;
    let malformed = list.iter().filter(|item| !item.is_object()).count();
    if malformed > 0 {
        debug!(malformed, "Provider returned non-object transcript items");
    }

    let items: Vec<RawSegment> = list.iter().map(RawSegment::from).collect();
    (!items.is_empty()).then_some(items)
}

/// Map provider items to segments, in order, and join every non-empty item
/// text with a single space. Items without readable offsets are kept out of `segments`.
pub fn normalize_transcript(items: &[RawSegment]) -> Transcript {
    let segments: Vec<TranscriptSegment> = items.iter().filter_map(RawSegment::to_segment).collect();
    if segments.len() < items.len() {
        debug!(
            skipped = items.len() - segments.len(),
            "Provider items without numeric offsets"
        );
    }

    let full_text = items
        .iter()
        .map(RawSegment::text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    Transcript {
        segments,
        full_text,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn normalizes_items_in_order() {
        let items: Vec<RawSegment> = serde_json::from_value(json!([
            {"text": "hello", "start": 0.0, "duration": 1.5},
            {"text": "there", "start": "1.5", "duration": "2.0"},
            {"text": "general", "start": 3.5, "duration": 1.0}
        ]))
        .unwrap();

        let transcript = normalize_transcript(&items);
        assert_eq!(transcript.full_text, "hello there general");
        assert_eq!(
            transcript.segments,
            vec![
                TranscriptSegment::new("hello", 0.0, 1.5),
                TranscriptSegment::new("there", 1.5, 2.0),
                TranscriptSegment::new("general", 3.5, 1.0),
            ]
        );
    }

    #[test]
    fn text_of_unreadable_items_still_reaches_full_text() {
        let items: Vec<RawSegment> = serde_json::from_value(json!([
            {"text": "kept", "start": 0, "duration": 1},
            {"text": "orphan"}
        ]))
        .unwrap();

        let transcript = normalize_transcript(&items);
        assert_eq!(transcript.segments.len(), 1);
        assert_eq!(transcript.full_text, "kept orphan");
    }

    #[test]
    fn malformed_items_are_kept_as_unreadable_candidates() {
        let items = transcript_items(&json!({"transcript": [
            {"text": "one", "start": 0, "duration": 1},
            null,
            "garbage",
            {"text": "two", "start": 1, "duration": 1}
        ]}))
        .unwrap();
        assert_eq!(items.len(), 4);

        let transcript = normalize_transcript(&items);
        assert_eq!(
            transcript.segments,
            vec![
                TranscriptSegment::new("one", 0.0, 1.0),
                TranscriptSegment::new("two", 1.0, 1.0),
            ]
        );
        assert_eq!(transcript.full_text, "one two");
    }

    #[test]
    fn empty_or_missing_transcript_counts_as_none() {
        assert!(transcript_items(&json!({})).is_none());
        assert!(transcript_items(&json!({"transcript": null})).is_none());
        assert!(transcript_items(&json!({"transcript": []})).is_none());
        assert!(transcript_items(&json!({"error": "nope"})).is_none());
        assert_eq!(
            transcript_items(&json!({"transcript": [{"text": "a", "start": 0, "duration": 1}]}))
                .map(|items| items.len()),
            Some(1)
        );
    }
}

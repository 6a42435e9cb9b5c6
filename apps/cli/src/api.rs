//! Client for the tubesum HTTP API.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tubesum_core::{SummaryResult, Transcript, TranscriptSegment};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001/api";

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct FullSummaryRequest<'a> {
    transcript: &'a str,
}

#[derive(Deserialize)]
struct FullSummaryResponse {
    summary: String,
}

#[derive(Serialize)]
struct IncrementalSummaryRequest<'a> {
    segments: &'a [TranscriptSegment],
}

#[derive(Deserialize)]
struct IncrementalSummaryResponse {
    summaries: Vec<SummaryResult>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn transcript(&self, video_id: &str) -> Result<Transcript> {
        let response = self
            .http
            .get(format!("{}/transcript/{}", self.base_url, video_id))
            .send()
            .await?;
        read_json(response, "Failed to fetch transcript or auto-generated captions").await
    }

    pub async fn full_summary(&self, transcript: &str) -> Result<String> {
        let response = self
            .http
            .post(format!("{}/summarize/full", self.base_url))
            .json(&FullSummaryRequest { transcript })
            .send()
            .await?;
        let body: FullSummaryResponse = read_json(response, "Failed to generate summary").await?;
        Ok(body.summary)
    }

    pub async fn incremental_summaries(
        &self,
        segments: &[TranscriptSegment],
    ) -> Result<Vec<SummaryResult>> {
        let response = self
            .http
            .post(format!("{}/summarize/incremental", self.base_url))
            .json(&IncrementalSummaryRequest { segments })
            .send()
            .await?;
        let body: IncrementalSummaryResponse =
            read_json(response, "Failed to generate incremental summaries").await?;
        Ok(body.summaries)
    }
}

/// Decode a success body, or surface the server's `{ "error": ... }` message.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response, fallback: &str) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| fallback.to_string());
    Err(anyhow!("{} (HTTP {})", message, status.as_u16()))
}

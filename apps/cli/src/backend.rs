use anyhow::Result;
use tubesum_core::{Pipeline, RawSegment, SummaryResult, Transcript, TranscriptSegment};

use crate::api::ApiClient;

/// Where the CLI sends its work: the API server, or the providers directly.
pub enum Backend {
    Remote(ApiClient),
    Local(Pipeline),
}

impl Backend {
    pub fn describe(&self) -> &'static str {
        match self {
            Backend::Remote(_) => "api",
            Backend::Local(_) => "local",
        }
    }

    pub async fn transcript(&self, video_id: &str) -> Result<Transcript> {
        match self {
            Backend::Remote(api) => api.transcript(video_id).await,
            Backend::Local(pipeline) => Ok(pipeline.transcript(video_id).await?),
        }
    }

    pub async fn full_summary(&self, transcript: &str) -> Result<String> {
        match self {
            Backend::Remote(api) => api.full_summary(transcript).await,
            Backend::Local(pipeline) => Ok(pipeline.full_summary(transcript).await?),
        }
    }

    pub async fn incremental_summaries(
        &self,
        segments: &[TranscriptSegment],
    ) -> Result<Vec<SummaryResult>> {
        match self {
            Backend::Remote(api) => api.incremental_summaries(segments).await,
            Backend::Local(pipeline) => {
                let raw: Vec<RawSegment> = segments.iter().map(RawSegment::from).collect();
                Ok(pipeline.incremental_summaries(&raw).await?)
            }
        }
    }
}

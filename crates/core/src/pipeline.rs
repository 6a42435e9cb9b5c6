use std::sync::Arc;

use crate::{
    chat::{ChatClient, ChatCompletion},
    config::Settings,
    error::Result,
    summarizer::Summarizer,
    title::TitleLookup,
    transcript::{TranscriptClient, TranscriptSource},
    types::{RawSegment, SummaryResult, Transcript},
    video_id::validate_video_id,
};

/// Transcript fetching and summarization behind one handle.
///
/// Cheap to clone; the server keeps one in its state and the CLI builds one
/// per run in `--local` mode.
#[derive(Clone)]
pub struct Pipeline {
    transcripts: Arc<dyn TranscriptSource>,
    summarizer: Arc<Summarizer>,
}

impl Pipeline {
    pub fn new(transcripts: Arc<dyn TranscriptSource>, summarizer: Summarizer) -> Self {
        Self {
            transcripts,
            summarizer: Arc::new(summarizer),
        }
    }

    /// Wire the real provider clients. Fails on missing credentials.
    pub fn from_settings(settings: &Settings, http: reqwest::Client) -> Result<Self> {
        let transcripts = TranscriptClient::new(settings, http.clone())?;
        let chat: Arc<dyn ChatCompletion> = Arc::new(ChatClient::new(settings, http)?);

        Ok(Self::new(
            Arc::new(transcripts),
            Summarizer::new(chat, settings.summary),
        ))
    }

    pub async fn transcript(&self, video_id: &str) -> Result<Transcript> {
        let video_id = validate_video_id(video_id)?;
        self.transcripts.fetch_transcript(video_id).await
    }

    pub async fn full_summary(&self, transcript: &str) -> Result<String> {
        self.summarizer.full_summary(transcript).await
    }

    pub async fn incremental_summaries(&self, segments: &[RawSegment]) -> Result<Vec<SummaryResult>> {
        self.summarizer.incremental_summaries(segments).await
    }
}

/// Title lookup for the configured oEmbed endpoint.
pub fn title_lookup(settings: &Settings, http: reqwest::Client) -> TitleLookup {
    TitleLookup::new(http, settings.title_lookup_url.clone())
}

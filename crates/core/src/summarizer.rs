use std::sync::Arc;

use tracing::info;

use crate::{
    chat::{ChatCompletion, CompletionRequest},
    chunker::Chunker,
    config::SummaryPolicy,
    error::Result,
    types::{RawSegment, SummaryResult},
};

static FULL_SUMMARY_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that summarizes YouTube video transcripts concisely.";

static SEGMENT_SUMMARY_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that summarizes segments of YouTube video transcripts concisely.";

pub struct Summarizer {
    chat: Arc<dyn ChatCompletion>,
    policy: SummaryPolicy,
}

impl Summarizer {
    pub fn new(chat: Arc<dyn ChatCompletion>, policy: SummaryPolicy) -> Self {
        Self { chat, policy }
    }

    /// Summarize a whole transcript in one request.
    pub async fn full_summary(&self, transcript: &str) -> Result<String> {
        info!(chars = transcript.len(), "Generating full summary");

        self.chat
            .complete(&CompletionRequest {
                system: FULL_SUMMARY_SYSTEM_PROMPT.to_string(),
                user: format!(
                    "Please provide a concise summary of the following YouTube video transcript. Focus on the main points and key insights:\n\n{}",
                    transcript
                ),
                max_tokens: self.policy.full_max_tokens,
            })
            .await
    }

    /// Chunk the segments by time and summarize each chunk.
    ///
    /// Chunks are summarized one after another, in order, so the provider sees
    /// at most one request from this call at a time.
    pub async fn incremental_summaries(&self, segments: &[RawSegment]) -> Result<Vec<SummaryResult>> {
        let chunks = Chunker::new(self.policy.chunk_ceiling_secs).chunk_raw(segments)?;
        info!(chunks = chunks.len(), "Generating incremental summaries");

        let mut summaries = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            let time = chunk.label(i);
            let summary = self
                .chat
                .complete(&CompletionRequest {
                    system: SEGMENT_SUMMARY_SYSTEM_PROMPT.to_string(),
                    user: format!(
                        "Please provide a brief summary of this segment of a YouTube video transcript:\n\n{}",
                        chunk.text()
                    ),
                    max_tokens: self.policy.segment_max_tokens,
                })
                .await?;

            summaries.push(SummaryResult { time, summary });
        }

        Ok(summaries)
    }
}

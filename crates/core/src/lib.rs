//! tubesum core library
//!
//! Fetches YouTube transcripts, chunks them into time windows, and requests
//! full and per-chunk summaries from a chat-completion provider.

pub mod chat;
pub mod chunker;
pub mod config;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod provider;
pub mod summarizer;
pub mod title;
pub mod transcript;
pub mod types;
pub mod video_id;

pub use chat::{ChatClient, ChatCompletion, CompletionRequest};
pub use chunker::{Chunk, Chunker, DEFAULT_CHUNK_CEILING_SECS, filter_segments};
pub use config::{Settings, SummaryPolicy};
pub use error::{ErrorKind, Result, TubesumError};
pub use format::{format_summaries_readable, format_time};
pub use pipeline::{Pipeline, title_lookup};
pub use provider::{Provider, ProviderConfig};
pub use summarizer::Summarizer;
pub use title::TitleLookup;
pub use transcript::{TranscriptClient, TranscriptSource, normalize_transcript};
pub use types::{RawSegment, SummaryResult, Transcript, TranscriptSegment};
pub use video_id::{extract_video_id, require_video_id, validate_video_id};

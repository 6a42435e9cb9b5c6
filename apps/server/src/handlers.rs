//! Request handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use tubesum_core::{RawSegment, SummaryResult, Transcript};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Liveness check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Server is running",
    })
}

/// `GET /api/transcript/:video_id`
pub async fn get_transcript(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<Json<Transcript>> {
    let transcript = state
        .pipeline
        .transcript(&video_id)
        .await
        .map_err(|e| ApiError::from_core(e, "Failed to fetch transcript"))?;

    Ok(Json(transcript))
}

#[derive(Deserialize)]
pub struct FullSummaryRequest {
    #[serde(default)]
    pub transcript: Option<String>,
}

#[derive(Serialize)]
pub struct FullSummaryResponse {
    pub summary: String,
}

/// `POST /api/summarize/full`
pub async fn summarize_full(
    State(state): State<AppState>,
    payload: Result<Json<FullSummaryRequest>, JsonRejection>,
) -> ApiResult<Json<FullSummaryResponse>> {
    let transcript = payload
        .ok()
        .and_then(|Json(req)| req.transcript)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Transcript is required"))?;

    let summary = state
        .pipeline
        .full_summary(&transcript)
        .await
        .map_err(|e| ApiError::from_core(e, "Failed to generate summary"))?;

    Ok(Json(FullSummaryResponse { summary }))
}

/// Elements are kept as raw JSON so one malformed entry only loses itself.
#[derive(Deserialize)]
pub struct IncrementalSummaryRequest {
    #[serde(default)]
    pub segments: Option<Vec<Value>>,
}

#[derive(Serialize)]
pub struct IncrementalSummaryResponse {
    pub summaries: Vec<SummaryResult>,
}

/// `POST /api/summarize/incremental`
pub async fn summarize_incremental(
    State(state): State<AppState>,
    payload: Result<Json<IncrementalSummaryRequest>, JsonRejection>,
) -> ApiResult<Json<IncrementalSummaryResponse>> {
    let segments = payload
        .ok()
        .and_then(|Json(req)| req.segments)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("Valid segments array is required"))?;

    let malformed = segments.iter().filter(|s| !s.is_object()).count();
    if malformed > 0 {
        warn!(malformed, "Ignoring non-object entries in segments array");
    }
    let candidates: Vec<RawSegment> = segments.iter().map(RawSegment::from).collect();

    info!(segments = candidates.len(), "Incremental summary requested");

    let summaries = state
        .pipeline
        .incremental_summaries(&candidates)
        .await
        .map_err(|e| ApiError::from_core(e, "Failed to generate incremental summaries"))?;

    Ok(Json(IncrementalSummaryResponse { summaries }))
}

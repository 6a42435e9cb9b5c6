//! One summary run: transcript, full summary, then segment summaries.

use std::time::{Duration, Instant};

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::warn;
use tubesum_core::SummaryResult;

use crate::backend::Backend;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub video_id: String,
    pub title: Option<String>,
    pub full_summary: String,
    pub summaries: Vec<SummaryResult>,
    /// Set when segment summaries failed after the full summary succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments_error: Option<String>,
}

pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.cyan} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn elapsed(start: Instant) -> String {
    style(format!("[{}]", format_duration(start.elapsed())))
        .dim()
        .to_string()
}

/// Run every step against `backend`.
///
/// Returns `Ok(None)` when the transcript has no text. A failure in the
/// segment step keeps the full summary and is reported in `segments_error`.
pub async fn summarize_video(
    backend: &Backend,
    video_id: &str,
    title: Option<String>,
) -> Result<Option<VideoSummary>> {
    // Step 1: Transcript
    let step_start = Instant::now();
    let spinner = create_spinner("Fetching transcript...");
    let transcript = match backend.transcript(video_id).await {
        Ok(t) => t,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };
    let duration_mins = transcript
        .segments
        .last()
        .map(|s| s.end() / 60.0)
        .unwrap_or(0.0);
    spinner.finish_with_message(format!(
        "{} Transcript: {:.1} min, {} segments {}",
        style("✓").green().bold(),
        duration_mins,
        transcript.segments.len(),
        elapsed(step_start)
    ));

    if transcript.full_text.trim().is_empty() {
        return Ok(None);
    }

    // Step 2: Full summary
    let step_start = Instant::now();
    let spinner = create_spinner("Generating full summary...");
    let full_summary = match backend.full_summary(&transcript.full_text).await {
        Ok(s) => s,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e);
        }
    };
    spinner.finish_with_message(format!(
        "{} Full summary {}",
        style("✓").green().bold(),
        elapsed(step_start)
    ));

    let mut report = VideoSummary {
        video_id: video_id.to_string(),
        title,
        full_summary,
        summaries: Vec::new(),
        segments_error: None,
    };

    if transcript.segments.is_empty() {
        warn!(video_id, "Transcript has no timed segments, skipping segment summaries");
        return Ok(Some(report));
    }

    // Step 3: Incremental summaries
    let step_start = Instant::now();
    let spinner = create_spinner("Generating segment summaries...");
    match backend.incremental_summaries(&transcript.segments).await {
        Ok(summaries) => {
            spinner.finish_with_message(format!(
                "{} {} segment summaries {}",
                style("✓").green().bold(),
                summaries.len(),
                elapsed(step_start)
            ));
            report.summaries = summaries;
        }
        Err(e) => {
            spinner.finish_with_message(format!(
                "{} Segment summaries failed {}",
                style("✗").red().bold(),
                elapsed(step_start)
            ));
            report.segments_error = Some(e.to_string());
        }
    }

    Ok(Some(report))
}

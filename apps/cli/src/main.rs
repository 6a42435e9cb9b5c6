use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use clap::Parser;
use console::style;
use tracing::debug;
use tubesum_core::{
    Pipeline, Settings, TitleLookup,
    config::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_TITLE_LOOKUP_URL},
    format_summaries_readable, require_video_id, title_lookup,
};

use crate::{
    api::{ApiClient, DEFAULT_API_BASE_URL},
    backend::Backend,
    run::{format_duration, summarize_video},
};

mod api;
mod backend;
mod run;

#[derive(Parser)]
#[command(name = "tubesum")]
#[command(about = "Summarize YouTube videos from their transcripts")]
struct Cli {
    /// YouTube video URL
    url: String,

    /// Base URL of the tubesum API server
    #[arg(long, env = "API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    /// Call the transcript and chat providers directly instead of the API server
    #[arg(short, long)]
    local: bool,

    /// Print the result as JSON instead of markdown
    #[arg(long)]
    json: bool,
}

/// API-server backend. Provider settings are never read here.
fn remote_backend<F>(api_base_url: &str, lookup: F) -> Result<(Backend, TitleLookup)>
where
    F: Fn(&str) -> Option<String>,
{
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
        .build()?;
    let title_url = lookup("TITLE_LOOKUP_URL")
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE_LOOKUP_URL.to_string());

    Ok((
        Backend::Remote(ApiClient::new(http.clone(), api_base_url)),
        TitleLookup::new(http, title_url),
    ))
}

/// In-process backend. Needs provider credentials.
fn local_backend() -> Result<(Backend, TitleLookup)> {
    let settings = Settings::from_env()?;
    let http = settings.http_client()?;
    let pipeline = Pipeline::from_settings(&settings, http.clone())?;
    Ok((Backend::Local(pipeline), title_lookup(&settings, http)))
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    // Quiet by default so log lines don't tear through the spinners.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(env_filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let video_id = match require_video_id(&cli.url) {
        Ok(id) => id,
        Err(_) => {
            eprintln!("{} Invalid YouTube URL", style("Error:").red().bold());
            std::process::exit(1);
        }
    };

    let built = if cli.local {
        local_backend()
    } else {
        remote_backend(&cli.api_base_url, |key| std::env::var(key).ok())
    };
    let (backend, titles) = match built {
        Ok(built) => built,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };
    debug!(video_id, backend = backend.describe(), "Starting summary run");

    if !cli.json {
        println!(
            "\n{}  {}\n",
            style("tubesum").cyan().bold(),
            style("YouTube Video Summarizer").dim()
        );
        println!(
            "{} Video {} {}",
            style("✓").green().bold(),
            style(&video_id).yellow(),
            style(format!("({})", backend.describe())).dim()
        );
        println!("{}", style("─".repeat(60)).dim());
    }

    let total_start = Instant::now();

    // Title is cosmetic; a failed lookup just leaves it out.
    let title = titles.video_title(&video_id).await;

    let Some(report) = summarize_video(&backend, &video_id, title).await? else {
        eprintln!(
            "{} Transcript is empty, nothing to summarize",
            style("!").yellow().bold()
        );
        return Ok(());
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "\n{} {}\n",
            style("Total time:").dim(),
            style(format_duration(total_start.elapsed())).cyan().bold()
        );
        println!("{}", style("─".repeat(60)).dim());

        let readable = format_summaries_readable(
            report.title.as_deref(),
            &report.full_summary,
            &report.summaries,
        );
        println!("{}", readable);
    }

    match report.segments_error {
        Some(e) => Err(anyhow!("Segment summaries failed: {e}")),
        None => Ok(()),
    }
}

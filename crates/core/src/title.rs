use serde::Deserialize;
use tracing::warn;

use crate::error::{Result, TubesumError};

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: Option<String>,
}

/// Video title lookup through a noembed-style oEmbed endpoint.
///
/// The lookup is cosmetic: [`TitleLookup::video_title`] never fails, it logs
/// and returns `None` instead.
#[derive(Clone)]
pub struct TitleLookup {
    http: reqwest::Client,
    endpoint: String,
}

impl TitleLookup {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub async fn video_title(&self, video_id: &str) -> Option<String> {
        match self.try_video_title(video_id).await {
            Ok(title) => title,
            Err(e) => {
                warn!(video_id, error = %e, "Video title lookup failed");
                None
            }
        }
    }

    async fn try_video_title(&self, video_id: &str) -> Result<Option<String>> {
        let watch_url = format!("https://www.youtube.com/watch?v={video_id}");
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("url", watch_url.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TubesumError::UpstreamStatus {
                service: "title lookup",
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let body = response.json::<OEmbedResponse>().await?;
        Ok(body.title.filter(|t| !t.trim().is_empty()))
    }
}

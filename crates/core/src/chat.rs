use async_trait::async_trait;
use tracing::debug;

use crate::{
    config::{ApiKey, Settings},
    error::{Result, TubesumError},
};

const SERVICE: &str = "chat provider";

/// A single system + user prompt with a completion token budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
}

#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Returns the trimmed text of the first reply.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatClient {
    http: reqwest::Client,
    api_url: String,
    model: String,
    api_key: ApiKey,
}

impl ChatClient {
    pub fn new(settings: &Settings, http: reqwest::Client) -> Result<Self> {
        Ok(Self {
            http,
            api_url: settings.chat.api_url.clone(),
            model: settings.chat.model.clone(),
            api_key: settings.chat_api_key()?.clone(),
        })
    }
}

#[async_trait]
impl ChatCompletion for ChatClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        debug!(model = %self.model, max_tokens = request.max_tokens, "Requesting completion");

        let response = self
            .http
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .json(&serde_json::json!({
                "model": self.model,
                "messages": [
                    {
                        "role": "system",
                        "content": request.system,
                    },
                    {
                        "role": "user",
                        "content": request.user,
                    },
                ],
                "max_tokens": request.max_tokens,
            }))
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

        let response = response.json::<serde_json::Value>().await?;
        extract_reply(&response)
    }
}

/// Pull `choices[0].message.content` out of a completion body.
pub fn extract_reply(response: &serde_json::Value) -> Result<String> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .map(|content| content.trim().to_string())
        .ok_or_else(|| TubesumError::InvalidResponse {
            service: SERVICE,
            reason: format!("no message content in {response}"),
        })
}

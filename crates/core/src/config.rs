//! Runtime settings shared by the server and the in-process CLI.
//!
//! Everything is read once into plain structs and handed to the components
//! that need it; nothing reads the environment after startup.

use std::{fmt, str::FromStr, time::Duration};

use crate::{
    chunker::DEFAULT_CHUNK_CEILING_SECS,
    error::{Result, TubesumError},
    provider::Provider,
};

pub const DEFAULT_TRANSCRIPT_API_URL: &str =
    "https://youtube-transcript3.p.rapidapi.com/api/transcript";
pub const TRANSCRIPT_API_KEY_VAR: &str = "RAPID_API_KEY";
pub const DEFAULT_TITLE_LOOKUP_URL: &str = "https://noembed.com/embed";
pub const DEFAULT_FULL_SUMMARY_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_SEGMENT_SUMMARY_MAX_TOKENS: u32 = 300;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Credential that never shows up in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone)]
pub struct TranscriptSettings {
    pub api_url: String,
    pub api_key: Option<ApiKey>,
    /// Language requested in auto-generated captions mode.
    pub fallback_lang: String,
    pub fallback_country: String,
}

#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub provider: Provider,
    pub api_url: String,
    pub model: String,
    pub api_key: Option<ApiKey>,
}

/// Chunking and token-budget policy for summaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryPolicy {
    pub chunk_ceiling_secs: f64,
    pub full_max_tokens: u32,
    pub segment_max_tokens: u32,
}

impl Default for SummaryPolicy {
    fn default() -> Self {
        Self {
            chunk_ceiling_secs: DEFAULT_CHUNK_CEILING_SECS,
            full_max_tokens: DEFAULT_FULL_SUMMARY_MAX_TOKENS,
            segment_max_tokens: DEFAULT_SEGMENT_SUMMARY_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub transcript: TranscriptSettings,
    pub chat: ChatSettings,
    pub summary: SummaryPolicy,
    pub title_lookup_url: String,
    pub http_timeout: Duration,
}

impl Settings {
    /// Load settings from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let provider = match get("CHAT_PROVIDER") {
            Some(name) => name.parse::<Provider>()?,
            None => Provider::default(),
        };
        let provider_config = provider.config();

        let summary = SummaryPolicy {
            chunk_ceiling_secs: parse_or(&get, "CHUNK_CEILING_SECS", DEFAULT_CHUNK_CEILING_SECS)?,
            full_max_tokens: parse_or(&get, "FULL_SUMMARY_MAX_TOKENS", DEFAULT_FULL_SUMMARY_MAX_TOKENS)?,
            segment_max_tokens: parse_or(
                &get,
                "SEGMENT_SUMMARY_MAX_TOKENS",
                DEFAULT_SEGMENT_SUMMARY_MAX_TOKENS,
            )?,
        };

        if !summary.chunk_ceiling_secs.is_finite() || summary.chunk_ceiling_secs <= 0.0 {
            return Err(invalid("CHUNK_CEILING_SECS", "must be a positive number of seconds"));
        }
        if summary.full_max_tokens == 0 {
            return Err(invalid("FULL_SUMMARY_MAX_TOKENS", "must be greater than zero"));
        }
        if summary.segment_max_tokens == 0 {
            return Err(invalid("SEGMENT_SUMMARY_MAX_TOKENS", "must be greater than zero"));
        }

        Ok(Self {
            transcript: TranscriptSettings {
                api_url: get("TRANSCRIPT_API_URL")
                    .unwrap_or_else(|| DEFAULT_TRANSCRIPT_API_URL.to_string()),
                api_key: get(TRANSCRIPT_API_KEY_VAR).map(ApiKey::new),
                fallback_lang: get("TRANSCRIPT_FALLBACK_LANG").unwrap_or_else(|| "en".to_string()),
                fallback_country: get("TRANSCRIPT_FALLBACK_COUNTRY")
                    .unwrap_or_else(|| "US".to_string()),
            },
            chat: ChatSettings {
                provider,
                api_url: get("CHAT_API_URL").unwrap_or_else(|| provider_config.api_url.to_string()),
                model: get("CHAT_MODEL").unwrap_or_else(|| provider_config.model.to_string()),
                api_key: get(provider_config.env_var).map(ApiKey::new),
            },
            summary,
            title_lookup_url: get("TITLE_LOOKUP_URL")
                .unwrap_or_else(|| DEFAULT_TITLE_LOOKUP_URL.to_string()),
            http_timeout: Duration::from_secs(parse_or(
                &get,
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
        })
    }

    /// Fail fast when either provider credential is missing.
    pub fn validate_credentials(&self) -> Result<()> {
        self.transcript_api_key()?;
        self.chat_api_key()?;
        Ok(())
    }

    pub fn transcript_api_key(&self) -> Result<&ApiKey> {
        self.transcript
            .api_key
            .as_ref()
            .ok_or_else(|| TubesumError::MissingApiKey {
                env_var: TRANSCRIPT_API_KEY_VAR.to_string(),
            })
    }

    pub fn chat_api_key(&self) -> Result<&ApiKey> {
        self.chat
            .api_key
            .as_ref()
            .ok_or_else(|| TubesumError::MissingApiKey {
                env_var: self.chat.provider.config().env_var.to_string(),
            })
    }

    /// HTTP client shared by every upstream call.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        Ok(reqwest::Client::builder()
            .timeout(self.http_timeout)
            .user_agent(concat!("tubesum/", env!("CARGO_PKG_VERSION")))
            .build()?)
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| invalid(key, &format!("'{raw}': {e}"))),
        None => Ok(default),
    }
}

fn invalid(key: &str, reason: &str) -> TubesumError {
    TubesumError::InvalidConfig {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

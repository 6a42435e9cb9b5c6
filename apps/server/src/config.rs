//! Server configuration.

use std::str::FromStr;

use tubesum_core::{Result, TubesumError};

/// HTTP listener and browser-facing settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Single origin allowed to call the API from a browser
    pub cors_origin: String,
    /// Max request body size in bytes
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            cors_origin: "http://localhost:5173".to_string(),
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config through an arbitrary key lookup. Empty values count as
    /// unset; malformed numbers are configuration errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or(get("PORT"), "PORT", defaults.port)?,
            cors_origin: get("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            max_body_size: parse_or(get("MAX_BODY_SIZE"), "MAX_BODY_SIZE", defaults.max_body_size)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw.parse().map_err(|e| TubesumError::InvalidConfig {
            key: key.to_string(),
            reason: format!("'{raw}': {e}"),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig> {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        ServerConfig::from_lookup(|key| map.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(&[("PORT", "  ")]).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:3001");
        assert_eq!(config.cors_origin, "http://localhost:5173");
        assert_eq!(config.max_body_size, 10 * 1024 * 1024);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config(&[("HOST", "127.0.0.1"), ("PORT", "8080"), ("MAX_BODY_SIZE", "1024")])
            .unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.max_body_size, 1024);
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        for (key, value) in [("PORT", "http"), ("PORT", "70000"), ("MAX_BODY_SIZE", "10MB")] {
            let err = config(&[(key, value)]).unwrap_err();
            assert!(
                matches!(err, TubesumError::InvalidConfig { key: ref k, .. } if k == key),
                "{key}={value} gave {err:?}"
            );
        }
    }
}

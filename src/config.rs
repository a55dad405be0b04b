use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Upstream inference service
    pub upstream_base_url: String,
    pub upstream_model: String,
    pub upstream_enabled: bool,

    // Relay behavior
    pub fallback_enabled: bool,
    pub default_max_tokens: u32,
    pub chars_per_token: u32,
    pub chunk_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()?,

            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            upstream_model: env::var("UPSTREAM_MODEL")
                .unwrap_or_else(|_| "llama3".to_string()),
            upstream_enabled: env_flag("UPSTREAM_ENABLED", false),

            fallback_enabled: env_flag("FALLBACK_ENABLED", true),
            default_max_tokens: env::var("DEFAULT_MAX_TOKENS")
                .unwrap_or_else(|_| "256".to_string())
                .parse()?,
            chars_per_token: env::var("CHARS_PER_TOKEN")
                .unwrap_or_else(|_| "3".to_string())
                .parse()?,
            chunk_delay_ms: env::var("CHUNK_DELAY_MS")
                .unwrap_or_else(|_| "40".to_string())
                .parse()?,
        })
    }
}

fn env_flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

#[cfg(test)]
impl Config {
    /// Test fixture: canned-only relay with no inter-chunk delay.
    pub fn for_tests() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            upstream_base_url: "http://127.0.0.1:9".to_string(),
            upstream_model: "llama3".to_string(),
            upstream_enabled: false,
            fallback_enabled: true,
            default_max_tokens: 256,
            chars_per_token: 3,
            chunk_delay_ms: 0,
        }
    }
}

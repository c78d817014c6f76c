use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Full URL of the text generation endpoint.
    pub service_url: String,
    pub project_id: String,
    /// Pre-issued bearer token. Never refreshed by this service.
    pub access_token: String,
    /// Kept for operators; token minting happens outside this service.
    #[allow(dead_code)]
    pub api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub generation_timeout: Duration,
    pub reveal_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            service_url: require_env("IBM_SERVICE_URL")?,
            project_id: require_env("IBM_PROJECT_ID")?,
            access_token: access_token_from_env()?,
            api_key: std::env::var("IBM_API_KEY").ok(),
            port: parse_env("PORT", 8080u16).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            generation_timeout: Duration::from_secs(
                parse_env("GENERATION_TIMEOUT_SECS", 120u64)
                    .context("GENERATION_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            reveal_delay: Duration::from_millis(
                parse_env("REVEAL_DELAY_MS", 5u64)
                    .context("REVEAL_DELAY_MS must be a whole number of milliseconds")?,
            ),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// `IBM_Access_Token` is the legacy spelling, accepted as a fallback.
fn access_token_from_env() -> Result<String> {
    std::env::var("IBM_ACCESS_TOKEN")
        .or_else(|_| std::env::var("IBM_Access_Token"))
        .context(
            "Required environment variable 'IBM_ACCESS_TOKEN' is not set \
             (legacy name 'IBM_Access_Token' is also accepted)",
        )
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        Err(_) => Ok(default),
    }
}

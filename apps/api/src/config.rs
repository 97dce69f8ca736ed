use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_CLAUDE_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Application configuration loaded from environment variables.
/// Built once at startup and handed to the router; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub claude_api_key: String,
    pub claude_api_url: String,
    pub claude_timeout: Duration,
    pub max_total_candidates: u32,
    pub top_n_to_display: u32,
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let claude_api_key = lookup("CLAUDE_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .context(
                "Required environment variable 'CLAUDE_API_KEY' is not set. \
                 Create .env with CLAUDE_API_KEY=...",
            )?;

        Ok(Config {
            claude_api_key,
            claude_api_url: lookup("CLAUDE_API_URL")
                .unwrap_or_else(|| DEFAULT_CLAUDE_API_URL.to_string()),
            claude_timeout: Duration::from_secs(parse_or(
                &lookup,
                "CLAUDE_TIMEOUT_SECS",
                30u64,
            )?),
            max_total_candidates: parse_or(&lookup, "MAX_TOTAL_CANDIDATES", 10)?,
            top_n_to_display: parse_or(&lookup, "TOP_N_TO_DISPLAY", 10)?,
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8000)?,
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid integer, got '{raw}'")),
        None => Ok(default),
    }
}

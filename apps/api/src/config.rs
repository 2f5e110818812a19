use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::editor::registry::DEFAULT_IDLE_TIMEOUT;
use crate::markdown::SanitizerPreference;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absent means records live in memory only.
    pub database_url: Option<String>,
    pub auth_url: String,
    pub auth_api_key: String,
    /// Absent means paged (PDF) export is disabled.
    pub rasterizer_url: Option<String>,
    pub scratch_dir: PathBuf,
    /// Editing sessions unused for this long are dropped from memory.
    pub session_idle: Duration,
    pub sanitizer: SanitizerPreference,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            auth_url: require_env("AUTH_URL")?,
            auth_api_key: require_env("AUTH_API_KEY")?,
            rasterizer_url: optional_env("RASTERIZER_URL"),
            scratch_dir: optional_env("SCRATCH_DIR")
                .unwrap_or_else(|| ".vitae-scratch".to_string())
                .into(),
            session_idle: match optional_env("SESSION_IDLE_MINUTES") {
                Some(minutes) => Duration::from_secs(
                    minutes
                        .parse::<u64>()
                        .context("SESSION_IDLE_MINUTES must be a whole number")?
                        * 60,
                ),
                None => DEFAULT_IDLE_TIMEOUT,
            },
            sanitizer: std::env::var("SANITIZER")
                .unwrap_or_default()
                .parse()
                .map_err(anyhow::Error::msg)
                .context("SANITIZER must be 'auto' or 'escape'")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

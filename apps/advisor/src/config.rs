use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::analysis_client::DEFAULT_BASE_URL;

/// Application configuration loaded from environment variables.
/// Every value has a default, so a bare environment works for local use.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub stub_port: u16,
    pub stub_result_path: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: optional_env("API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            stub_port: optional_env("STUB_PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse::<u16>()
                .context("STUB_PORT must be a valid port number")?,
            stub_result_path: optional_env("STUB_RESULT_PATH").map(PathBuf::from),
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Unset and blank variables both count as missing.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

use anyhow::{Context, Result};

use crate::assessment::collector::DEFAULT_DURATION_SECS;
use crate::assessment::registry::DEFAULT_RETENTION_SECS;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub port: u16,
    pub rust_log: String,
    pub assessment_duration_secs: u32,
    /// How long a persisted attempt stays readable before it is evicted from memory.
    pub assessment_retention_secs: u32,
    /// Remote catalog document. The embedded catalog is used when unset.
    pub catalog_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            assessment_duration_secs: match std::env::var("ASSESSMENT_DURATION_SECS") {
                Ok(raw) => parse_duration(&raw)?,
                Err(_) => DEFAULT_DURATION_SECS,
            },
            assessment_retention_secs: match std::env::var("ASSESSMENT_RETENTION_SECS") {
                Ok(raw) => parse_secs("ASSESSMENT_RETENTION_SECS", &raw)?,
                Err(_) => DEFAULT_RETENTION_SECS,
            },
            catalog_url: std::env::var("CATALOG_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_secs(key: &str, raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .with_context(|| format!("{key} must be a whole number of seconds"))
}

fn parse_duration(raw: &str) -> Result<u32> {
    let secs = parse_secs("ASSESSMENT_DURATION_SECS", raw)?;
    anyhow::ensure!(secs > 0, "ASSESSMENT_DURATION_SECS must be greater than zero");
    Ok(secs)
}

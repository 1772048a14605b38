use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Only DATABASE_URL is required at startup; generation API keys are
/// checked per-request so the service can boot without them.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: Option<String>,
    pub runware_api_key: Option<String>,
    pub replicate_api_token: Option<String>,
    /// Which image backend to construct at startup: "runware" | "replicate".
    pub image_provider: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            openai_api_key: optional_env("OPENAI_API_KEY"),
            runware_api_key: optional_env("RUNWARE_API_KEY"),
            replicate_api_token: optional_env("REPLICATE_API_TOKEN"),
            image_provider: std::env::var("IMAGE_PROVIDER")
                .unwrap_or_else(|_| "runware".to_string()),
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

/// Treats unset AND empty variables as absent — an empty key in a .env file
/// must not be mistaken for a configured credential.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

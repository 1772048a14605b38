//! Image generation — pluggable provider behind a trait.
//!
//! `AppState` holds an `Arc<dyn ImageGenerator>`, selected at startup via
//! IMAGE_PROVIDER. Default: `RunwareClient` (one synchronous call). Alternate:
//! `ReplicateClient` (submit a prediction, poll until terminal).
//!
//! Every provider returns a hosted image URL or an error — never an empty
//! URL, so callers can patch rows without re-checking.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

pub mod handlers;
pub mod replicate;
pub mod runware;

use crate::config::Config;
pub use replicate::ReplicateClient;
pub use runware::RunwareClient;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("generation failed: {0}")]
    Failed(String),

    #[error("response contained no usable image URL")]
    MissingUrl,
}

/// The image provider trait. Implement this to swap backends without touching
/// the endpoint, handler, or caller code.
///
/// Carried in `AppState` as `Arc<dyn ImageGenerator>`.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Turns a text prompt into a hosted image URL.
    async fn generate(&self, prompt: &str) -> Result<String, ImageError>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

/// Builds the configured provider, or `None` when its API key is absent —
/// the image endpoint then rejects requests before any network call.
pub fn build_provider(config: &Config) -> Option<Arc<dyn ImageGenerator>> {
    match config.image_provider.as_str() {
        "replicate" => config.replicate_api_token.as_ref().map(|token| {
            info!("Image provider: replicate");
            Arc::new(ReplicateClient::new(token.clone())) as Arc<dyn ImageGenerator>
        }),
        _ => config.runware_api_key.as_ref().map(|key| {
            info!("Image provider: runware");
            Arc::new(RunwareClient::new(key.clone())) as Arc<dyn ImageGenerator>
        }),
    }
}

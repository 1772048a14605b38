use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::image::ImageGenerator;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The LLM and image clients are `None` when their API keys are not
/// configured; handlers reject those requests before any network call.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: Option<LlmClient>,
    /// Pluggable image backend. Default: Runware (sync). Swap via IMAGE_PROVIDER env.
    pub image: Option<Arc<dyn ImageGenerator>>,
    pub config: Config,
}

impl AppState {
    /// Returns the LLM client or the error both generation endpoints report
    /// when OPENAI_API_KEY is unset.
    pub fn require_llm(&self) -> Result<&LlmClient, crate::errors::AppError> {
        self.llm
            .as_ref()
            .ok_or_else(|| crate::errors::AppError::Config("OPENAI_API_KEY is not set".to_string()))
    }

    pub fn require_image(&self) -> Result<&Arc<dyn ImageGenerator>, crate::errors::AppError> {
        self.image.as_ref().ok_or_else(|| {
            crate::errors::AppError::Config(
                "No image provider API key is set (RUNWARE_API_KEY or REPLICATE_API_TOKEN)"
                    .to_string(),
            )
        })
    }
}

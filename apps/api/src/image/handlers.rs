//! Axum route handler for image generation.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::campaign::CampaignCreativeRow;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct GenerateImageRequest {
    /// Overrides the stored image prompt when present.
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateImageResponse {
    pub success: bool,
    pub image_url: String,
}

/// POST /api/v1/creatives/:id/image
///
/// Generates an image for a creative and patches its image_url. Repeated
/// calls overwrite the stored URL; a provider reply with no usable URL is an
/// error and leaves the row untouched.
pub async fn handle_generate_image(
    State(state): State<AppState>,
    Path(creative_id): Path<Uuid>,
    Json(request): Json<GenerateImageRequest>,
) -> Result<Json<GenerateImageResponse>, AppError> {
    let provider = state.require_image()?;

    let creative = sqlx::query_as::<_, CampaignCreativeRow>(
        "SELECT * FROM campaign_creatives WHERE id = $1",
    )
    .bind(creative_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Creative {creative_id} not found")))?;

    let prompt = request
        .prompt
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .or_else(|| {
            creative
                .image_prompt
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
        })
        .ok_or_else(|| {
            AppError::Validation(
                "Missing required parameter: prompt (and the creative has no stored image prompt)"
                    .to_string(),
            )
        })?;

    let image_url = provider
        .generate(prompt)
        .await
        .map_err(|e| AppError::Image(format!("{} provider: {e}", provider.name())))?;

    // Only reached with a non-empty URL — a failed generation never nulls
    // out a previously stored image.
    sqlx::query("UPDATE campaign_creatives SET image_url = $1, updated_at = now() WHERE id = $2")
        .bind(&image_url)
        .bind(creative_id)
        .execute(&state.db)
        .await?;

    Ok(Json(GenerateImageResponse {
        success: true,
        image_url,
    }))
}

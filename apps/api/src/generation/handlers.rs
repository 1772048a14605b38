//! Axum route handlers for the generation endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::cohorts::generate_cohorts;
use crate::generation::creatives::generate_creative;
use crate::models::campaign::{CampaignCreativeRow, MicroCohortRow};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateCohortsResponse {
    pub cohorts: Vec<MicroCohortRow>,
}

#[derive(Debug, Serialize)]
pub struct GenerateCreativeResponse {
    pub creative: CampaignCreativeRow,
}

/// POST /api/v1/campaigns/:id/generate
///
/// Full cohort pipeline: brand context → prompt → LLM → parse → persist.
/// Rejects before any network call when OPENAI_API_KEY is unset.
pub async fn handle_generate_cohorts(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<GenerateCohortsResponse>, AppError> {
    let llm = state.require_llm()?;
    let cohorts = generate_cohorts(&state.db, llm, campaign_id).await?;
    Ok(Json(GenerateCohortsResponse { cohorts }))
}

/// POST /api/v1/cohorts/:id/creatives/generate
///
/// Generates one creative (headline, copy, CTA, image prompt) for a cohort.
pub async fn handle_generate_creative(
    State(state): State<AppState>,
    Path(cohort_id): Path<Uuid>,
) -> Result<Json<GenerateCreativeResponse>, AppError> {
    let llm = state.require_llm()?;
    let creative = generate_creative(&state.db, llm, cohort_id).await?;
    Ok(Json(GenerateCreativeResponse { creative }))
}

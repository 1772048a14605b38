//! Axum route handlers for campaigns, cohorts, and creatives.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::campaign::{CampaignCreativeRow, CampaignRow, MicroCohortRow};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreateCampaignRequest {
    pub user_id: Uuid,
    pub title: String,
    pub prompt: String,
    pub budget: Option<String>,
    pub primary_channel: String,
    pub content_type: String,
}

#[derive(Debug, Serialize)]
pub struct CohortDetail {
    pub cohort: MicroCohortRow,
    pub creatives: Vec<CampaignCreativeRow>,
}

#[derive(Debug, Serialize)]
pub struct CampaignDetailResponse {
    pub campaign: CampaignRow,
    pub cohorts: Vec<CohortDetail>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateImagePromptRequest {
    pub image_prompt: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Campaign handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/campaigns
///
/// Creates a draft campaign. Generation is a separate call so the row exists
/// even when the LLM is down.
pub async fn handle_create_campaign(
    State(state): State<AppState>,
    Json(req): Json<CreateCampaignRequest>,
) -> Result<Json<CampaignRow>, AppError> {
    if req.title.trim().len() < 3 {
        return Err(AppError::Validation(
            "title must be at least 3 characters".to_string(),
        ));
    }
    if req.prompt.trim().len() < 10 {
        return Err(AppError::Validation(
            "prompt must describe the campaign (at least 10 characters)".to_string(),
        ));
    }
    if req.primary_channel.trim().is_empty() {
        return Err(AppError::Validation(
            "primary_channel cannot be empty".to_string(),
        ));
    }
    if req.content_type.trim().is_empty() {
        return Err(AppError::Validation(
            "content_type cannot be empty".to_string(),
        ));
    }

    let row = sqlx::query_as::<_, CampaignRow>(
        r#"
        INSERT INTO campaigns
            (id, user_id, title, prompt, budget, primary_channel, content_type, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'draft')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.user_id)
    .bind(req.title.trim())
    .bind(&req.prompt)
    .bind(&req.budget)
    .bind(&req.primary_channel)
    .bind(&req.content_type)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// GET /api/v1/campaigns
pub async fn handle_list_campaigns(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<CampaignRow>>, AppError> {
    let campaigns = sqlx::query_as::<_, CampaignRow>(
        "SELECT * FROM campaigns WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(campaigns))
}

/// GET /api/v1/campaigns/:id
///
/// Returns the campaign with its cohorts and each cohort's creatives —
/// everything the review page renders.
pub async fn handle_get_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<CampaignDetailResponse>, AppError> {
    let campaign = sqlx::query_as::<_, CampaignRow>("SELECT * FROM campaigns WHERE id = $1")
        .bind(campaign_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Campaign {campaign_id} not found")))?;

    let cohort_rows = sqlx::query_as::<_, MicroCohortRow>(
        "SELECT * FROM micro_cohorts WHERE campaign_id = $1 ORDER BY created_at",
    )
    .bind(campaign_id)
    .fetch_all(&state.db)
    .await?;

    let mut cohorts = Vec::with_capacity(cohort_rows.len());
    for cohort in cohort_rows {
        let creatives = sqlx::query_as::<_, CampaignCreativeRow>(
            "SELECT * FROM campaign_creatives WHERE cohort_id = $1 ORDER BY created_at",
        )
        .bind(cohort.id)
        .fetch_all(&state.db)
        .await?;
        cohorts.push(CohortDetail { cohort, creatives });
    }

    Ok(Json(CampaignDetailResponse { campaign, cohorts }))
}

/// DELETE /api/v1/campaigns/:id
///
/// Cascades to cohorts and creatives via FK.
pub async fn handle_delete_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM campaigns WHERE id = $1")
        .bind(campaign_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Campaign {campaign_id} not found"
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/campaigns/:id/activate
///
/// The review page's "Save Campaign" action: status draft → active.
pub async fn handle_activate_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<CampaignRow>, AppError> {
    let row = sqlx::query_as::<_, CampaignRow>(
        "UPDATE campaigns SET status = 'active', updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(campaign_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Campaign {campaign_id} not found")))?;

    Ok(Json(row))
}

// ────────────────────────────────────────────────────────────────────────────
// Cohort handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/campaigns/:id/cohorts
pub async fn handle_list_cohorts(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<Vec<MicroCohortRow>>, AppError> {
    let cohorts = sqlx::query_as::<_, MicroCohortRow>(
        "SELECT * FROM micro_cohorts WHERE campaign_id = $1 ORDER BY created_at",
    )
    .bind(campaign_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(cohorts))
}

/// DELETE /api/v1/cohorts/:id
pub async fn handle_delete_cohort(
    State(state): State<AppState>,
    Path(cohort_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM micro_cohorts WHERE id = $1")
        .bind(cohort_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Cohort {cohort_id} not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Creative handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/cohorts/:id/creatives
pub async fn handle_list_creatives(
    State(state): State<AppState>,
    Path(cohort_id): Path<Uuid>,
) -> Result<Json<Vec<CampaignCreativeRow>>, AppError> {
    let creatives = sqlx::query_as::<_, CampaignCreativeRow>(
        "SELECT * FROM campaign_creatives WHERE cohort_id = $1 ORDER BY created_at",
    )
    .bind(cohort_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(creatives))
}

/// PATCH /api/v1/creatives/:id/image-prompt
///
/// Manual prompt edit from the review page. The caller re-triggers image
/// generation separately.
pub async fn handle_update_image_prompt(
    State(state): State<AppState>,
    Path(creative_id): Path<Uuid>,
    Json(req): Json<UpdateImagePromptRequest>,
) -> Result<Json<CampaignCreativeRow>, AppError> {
    if req.image_prompt.trim().is_empty() {
        return Err(AppError::Validation(
            "image_prompt cannot be empty".to_string(),
        ));
    }

    let row = sqlx::query_as::<_, CampaignCreativeRow>(
        r#"
        UPDATE campaign_creatives
        SET image_prompt = $1, updated_at = now()
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(req.image_prompt.trim())
    .bind(creative_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Creative {creative_id} not found")))?;

    Ok(Json(row))
}

/// DELETE /api/v1/creatives/:id
pub async fn handle_delete_creative(
    State(state): State<AppState>,
    Path(creative_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM campaign_creatives WHERE id = $1")
        .bind(creative_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Creative {creative_id} not found"
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

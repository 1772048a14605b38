//! Axum route handlers for brand guidelines.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::brand::fetch_brand_guidelines;
use crate::errors::AppError;
use crate::models::brand::BrandGuidelinesRow;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpsertBrandRequest {
    pub user_id: Uuid,
    pub brand_name: String,
    pub brand_tone: String,
    pub brand_voice: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub sample_tagline: Option<String>,
    pub do_not_use_phrases: Option<String>,
    pub logo_url: Option<String>,
}

/// GET /api/v1/brand
pub async fn handle_get_brand(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<BrandGuidelinesRow>, AppError> {
    let brand = fetch_brand_guidelines(&state.db, params.user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No brand guidelines for user {}",
                params.user_id
            ))
        })?;

    Ok(Json(brand))
}

/// PUT /api/v1/brand
///
/// Insert-or-update: brand guidelines are one-to-one with a user account.
pub async fn handle_upsert_brand(
    State(state): State<AppState>,
    Json(req): Json<UpsertBrandRequest>,
) -> Result<Json<BrandGuidelinesRow>, AppError> {
    if req.brand_name.trim().is_empty() {
        return Err(AppError::Validation("brand_name cannot be empty".to_string()));
    }
    if req.brand_tone.trim().is_empty() {
        return Err(AppError::Validation("brand_tone cannot be empty".to_string()));
    }

    let row = sqlx::query_as::<_, BrandGuidelinesRow>(
        r#"
        INSERT INTO brand_guidelines
            (id, user_id, brand_name, brand_tone, brand_voice, primary_color,
             secondary_color, sample_tagline, do_not_use_phrases, logo_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (user_id) DO UPDATE SET
            brand_name = EXCLUDED.brand_name,
            brand_tone = EXCLUDED.brand_tone,
            brand_voice = EXCLUDED.brand_voice,
            primary_color = EXCLUDED.primary_color,
            secondary_color = EXCLUDED.secondary_color,
            sample_tagline = EXCLUDED.sample_tagline,
            do_not_use_phrases = EXCLUDED.do_not_use_phrases,
            logo_url = EXCLUDED.logo_url,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.user_id)
    .bind(&req.brand_name)
    .bind(&req.brand_tone)
    .bind(&req.brand_voice)
    .bind(&req.primary_color)
    .bind(&req.secondary_color)
    .bind(&req.sample_tagline)
    .bind(&req.do_not_use_phrases)
    .bind(&req.logo_url)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

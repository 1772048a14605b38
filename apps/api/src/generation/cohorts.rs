//! Cohort generation — orchestrates the campaign → micro-cohorts pipeline.
//!
//! Flow: fetch campaign → fetch brand guidelines (defaults when absent) →
//!       compose prompt → LLM call → parse (JSON / headers / raw fallback) →
//!       best-effort inserts → return inserted rows.
//!
//! Inserts are not transactional: a failed row is logged and skipped so the
//! remaining cohorts still land.

use serde_json::Value;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::brand::fetch_brand_guidelines;
use crate::errors::AppError;
use crate::generation::parser::{parse_cohort_reply, GeneratedCohort};
use crate::generation::prompts::{format_brand_info, COHORT_PROMPT_TEMPLATE, COHORT_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::campaign::{CampaignRow, MicroCohortRow};

/// How many micro-cohorts each generation run asks the model for.
pub const REQUESTED_COHORTS: usize = 3;

/// Substituted when the model does not supply channels for a cohort.
pub const DEFAULT_CHANNELS: [&str; 3] = ["social", "email", "display"];

/// Runs the cohort generation pipeline for one campaign and persists results.
pub async fn generate_cohorts(
    pool: &PgPool,
    llm: &LlmClient,
    campaign_id: Uuid,
) -> Result<Vec<MicroCohortRow>, AppError> {
    let campaign = sqlx::query_as::<_, CampaignRow>("SELECT * FROM campaigns WHERE id = $1")
        .bind(campaign_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Campaign {campaign_id} not found")))?;

    let brand = fetch_brand_guidelines(pool, campaign.user_id).await?;

    let prompt = build_cohort_prompt(&campaign, format_brand_info(brand.as_ref()));

    let reply = llm
        .complete(COHORT_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Cohort generation LLM call failed: {e}")))?;

    let generated = parse_cohort_reply(&reply);
    info!(
        "Parsed {} cohorts for campaign {}",
        generated.micro_cohorts.len(),
        campaign_id
    );

    let mut inserted = Vec::with_capacity(generated.micro_cohorts.len());
    for cohort in &generated.micro_cohorts {
        match insert_cohort(pool, campaign_id, cohort).await {
            Ok(row) => inserted.push(row),
            // Best-effort: skip the failed row, keep the rest.
            Err(e) => error!(
                "Failed to insert cohort '{}' for campaign {}: {e}",
                cohort.title, campaign_id
            ),
        }
    }

    info!(
        "Generated {} cohorts for campaign {} ({} parsed)",
        inserted.len(),
        campaign_id,
        generated.micro_cohorts.len()
    );

    Ok(inserted)
}

fn build_cohort_prompt(campaign: &CampaignRow, brand_info: String) -> String {
    COHORT_PROMPT_TEMPLATE
        .replace("{brand_info}", &brand_info)
        .replace("{brief}", &campaign.prompt)
        .replace(
            "{budget}",
            campaign.budget.as_deref().unwrap_or("Not specified"),
        )
        .replace("{cohort_count}", &REQUESTED_COHORTS.to_string())
}

async fn insert_cohort(
    pool: &PgPool,
    campaign_id: Uuid,
    cohort: &GeneratedCohort,
) -> Result<MicroCohortRow, sqlx::Error> {
    let channels = channels_value(cohort.recommended_channels.as_deref());

    sqlx::query_as::<_, MicroCohortRow>(
        r#"
        INSERT INTO micro_cohorts
            (id, campaign_id, title, description, demographics, recommended_channels)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(campaign_id)
    .bind(&cohort.title)
    .bind(&cohort.description)
    .bind(&cohort.demographics)
    .bind(channels)
    .fetch_one(pool)
    .await
}

/// Model-supplied channels when present and non-empty, DEFAULT_CHANNELS otherwise.
fn channels_value(channels: Option<&[String]>) -> Value {
    match channels {
        Some(list) if !list.is_empty() => Value::from(list.to_vec()),
        _ => Value::from(
            DEFAULT_CHANNELS
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>(),
        ),
    }
}

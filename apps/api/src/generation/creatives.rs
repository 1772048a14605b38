//! Creative generation — one ad creative (copy + image prompt) per cohort run.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::brand::fetch_brand_guidelines;
use crate::errors::AppError;
use crate::generation::parser::parse_creative_reply;
use crate::generation::prompts::{format_brand_info, CREATIVE_PROMPT_TEMPLATE, CREATIVE_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::campaign::{CampaignCreativeRow, CampaignRow, MicroCohortRow};

/// Runs the creative generation pipeline for one cohort and persists the result.
/// The creative row is inserted with a NULL image_url; image generation is a
/// separate, independently-triggered call.
pub async fn generate_creative(
    pool: &PgPool,
    llm: &LlmClient,
    cohort_id: Uuid,
) -> Result<CampaignCreativeRow, AppError> {
    let cohort = sqlx::query_as::<_, MicroCohortRow>("SELECT * FROM micro_cohorts WHERE id = $1")
        .bind(cohort_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Cohort {cohort_id} not found")))?;

    let campaign = sqlx::query_as::<_, CampaignRow>("SELECT * FROM campaigns WHERE id = $1")
        .bind(cohort.campaign_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Campaign {} not found", cohort.campaign_id))
        })?;

    let brand = fetch_brand_guidelines(pool, campaign.user_id).await?;

    let prompt = build_creative_prompt(&campaign, &cohort, format_brand_info(brand.as_ref()));

    let reply = llm
        .complete(CREATIVE_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Creative generation LLM call failed: {e}")))?;

    let creative = parse_creative_reply(&reply)
        .map_err(|e| AppError::Llm(format!("Failed to parse AI response as JSON: {e}")))?;

    let row = sqlx::query_as::<_, CampaignCreativeRow>(
        r#"
        INSERT INTO campaign_creatives
            (id, cohort_id, headline, description, cta, image_prompt)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(cohort_id)
    .bind(&creative.headline)
    .bind(&creative.description)
    .bind(&creative.cta)
    .bind(&creative.image_prompt)
    .fetch_one(pool)
    .await?;

    info!(
        "Generated creative {} for cohort {} (headline: {})",
        row.id, cohort_id, row.headline
    );

    Ok(row)
}

fn build_creative_prompt(
    campaign: &CampaignRow,
    cohort: &MicroCohortRow,
    brand_info: String,
) -> String {
    CREATIVE_PROMPT_TEMPLATE
        .replace("{brand_info}", &brand_info)
        .replace("{brief}", &campaign.prompt)
        .replace("{cohort_title}", &cohort.title)
        .replace("{cohort_description}", &cohort.description)
        .replace("{cohort_demographics}", &cohort.demographics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn prompt_embeds_cohort_profile_and_brief() {
        let campaign = CampaignRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Monsoon Travel Promotion".to_string(),
            prompt: "Promote monsoon travel packages".to_string(),
            budget: None,
            primary_channel: "social".to_string(),
            content_type: "image".to_string(),
            status: "draft".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let cohort = MicroCohortRow {
            id: Uuid::new_v4(),
            campaign_id: campaign.id,
            title: "Family Memory Makers".to_string(),
            description: "Parents planning memorable trips".to_string(),
            demographics: "30-45 years, Suburban".to_string(),
            recommended_channels: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let prompt = build_creative_prompt(&campaign, &cohort, format_brand_info(None));
        assert!(prompt.contains("Name: Family Memory Makers"));
        assert!(prompt.contains("Description: Parents planning memorable trips"));
        assert!(prompt.contains("Demographics: 30-45 years, Suburban"));
        assert!(prompt.contains("Promote monsoon travel packages"));
        assert!(!prompt.contains("{cohort_title}"));
    }
}

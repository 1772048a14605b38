use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Status is a plain string — "draft" and "active" are the values the UI
/// writes; no transition rules are enforced.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CampaignRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub prompt: String,
    pub budget: Option<String>,
    pub primary_channel: String,
    pub content_type: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MicroCohortRow {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub title: String,
    pub description: String,
    /// Plain comma-separated string, e.g. "25-34 years, Urban, Income $75k+".
    pub demographics: String,
    /// Loosely-typed JSON list of channel names.
    pub recommended_channels: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CampaignCreativeRow {
    pub id: Uuid,
    pub cohort_id: Uuid,
    pub headline: String,
    pub description: String,
    pub cta: String,
    pub image_prompt: Option<String>,
    /// Populated asynchronously once an image has been generated.
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

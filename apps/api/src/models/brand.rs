use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row per user. Conditions every generation prompt.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BrandGuidelinesRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub brand_name: String,
    pub brand_tone: String,
    pub brand_voice: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub sample_tagline: Option<String>,
    pub do_not_use_phrases: Option<String>,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Brand guidelines: one row per user, conditions every generation prompt.

pub mod handlers;

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::brand::BrandGuidelinesRow;

/// Fetches a user's brand guidelines. `None` is a normal outcome — the
/// generation pipelines substitute defaults rather than failing.
pub async fn fetch_brand_guidelines(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<BrandGuidelinesRow>, AppError> {
    let row = sqlx::query_as::<_, BrandGuidelinesRow>(
        "SELECT * FROM brand_guidelines WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

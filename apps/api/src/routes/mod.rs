pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::brand::handlers as brand;
use crate::campaigns::handlers as campaigns;
use crate::generation::handlers as generation;
use crate::image::handlers as image;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Brand guidelines
        .route(
            "/api/v1/brand",
            get(brand::handle_get_brand).put(brand::handle_upsert_brand),
        )
        // Campaigns
        .route(
            "/api/v1/campaigns",
            post(campaigns::handle_create_campaign).get(campaigns::handle_list_campaigns),
        )
        .route(
            "/api/v1/campaigns/:id",
            get(campaigns::handle_get_campaign).delete(campaigns::handle_delete_campaign),
        )
        .route(
            "/api/v1/campaigns/:id/activate",
            post(campaigns::handle_activate_campaign),
        )
        .route(
            "/api/v1/campaigns/:id/generate",
            post(generation::handle_generate_cohorts),
        )
        .route(
            "/api/v1/campaigns/:id/cohorts",
            get(campaigns::handle_list_cohorts),
        )
        // Cohorts
        .route(
            "/api/v1/cohorts/:id",
            delete(campaigns::handle_delete_cohort),
        )
        .route(
            "/api/v1/cohorts/:id/creatives",
            get(campaigns::handle_list_creatives),
        )
        .route(
            "/api/v1/cohorts/:id/creatives/generate",
            post(generation::handle_generate_creative),
        )
        // Creatives
        .route(
            "/api/v1/creatives/:id",
            delete(campaigns::handle_delete_creative),
        )
        .route(
            "/api/v1/creatives/:id/image-prompt",
            patch(campaigns::handle_update_image_prompt),
        )
        .route(
            "/api/v1/creatives/:id/image",
            post(image::handle_generate_image),
        )
        .with_state(state)
}

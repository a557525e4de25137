use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{ReviewDraft, ReviewListing, ReviewSubmission};
use crate::services::ReviewService;

#[axum::debug_handler]
pub async fn list_reviews(
    State(config): State<Arc<AppConfig>>,
) -> Json<ReviewListing> {
    let service = ReviewService::new(&config);

    Json(service.list_reviews().await)
}

#[axum::debug_handler]
pub async fn create_review(
    State(config): State<Arc<AppConfig>>,
    payload: Result<Json<ReviewDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<ReviewSubmission>), AppError> {
    let Json(draft) = payload?;
    let service = ReviewService::new(&config);

    let submission = service.post_review(&draft, config.clinic_now().date()).await?;

    Ok((StatusCode::CREATED, Json(submission)))
}

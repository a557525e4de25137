use std::sync::Arc;

use axum::{Router, routing::get};

use shared_config::AppConfig;

use crate::handlers;

pub fn review_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::list_reviews).post(handlers::create_review))
        .with_state(state)
}

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_config::AppConfig;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", post(handlers::create_appointment))
        .route("/dates", get(handlers::get_bookable_dates))
        .route("/slots", get(handlers::get_available_slots))
        .with_state(state)
}

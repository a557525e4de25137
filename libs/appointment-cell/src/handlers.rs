use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{AppointmentDraft, DaySlotsResponse, SlotQuery};
use crate::services::availability::readable_date;
use crate::services::{AvailabilityCalculator, BookingService};

pub const NO_SLOTS_MESSAGE: &str = "No time slots available for this date. Please choose another day.";
pub const CONFIRMATION_MESSAGE: &str = "Appointment Request Received! Our team will contact you shortly to confirm your appointment.";

#[axum::debug_handler]
pub async fn get_bookable_dates(
    State(config): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let calculator = AvailabilityCalculator::from_config(&config)?;
    let dates = calculator.bookable_dates(config.clinic_now());

    Ok(Json(json!({ "dates": dates })))
}

#[axum::debug_handler]
pub async fn get_available_slots(
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<DaySlotsResponse>, AppError> {
    let now = config.clinic_now();
    let date = match query.date.as_deref().map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| AppError::BadRequest(format!("Invalid date: {}", raw)))?,
        None => now.date(),
    };

    let calculator = AvailabilityCalculator::from_config(&config)?;
    let periods = calculator.slots_for(now, date)?;
    let available = !periods.is_empty();

    Ok(Json(DaySlotsResponse {
        date,
        label: readable_date(date),
        available,
        periods,
        message: (!available).then(|| NO_SLOTS_MESSAGE.to_string()),
    }))
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(config): State<Arc<AppConfig>>,
    payload: Result<Json<AppointmentDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(draft) = payload?;
    let service = BookingService::new(&config)?;

    let appointment = service.submit(&draft, config.clinic_now()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "appointment": appointment,
            "message": CONFIRMATION_MESSAGE
        })),
    ))
}

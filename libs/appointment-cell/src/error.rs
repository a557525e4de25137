use chrono::NaiveDate;
use thiserror::Error;

use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Please fill in all required fields")]
    MissingRequiredFields,

    #[error("{0}")]
    InvalidField(String),

    #[error("Appointments can only be booked from {first} to {last}, not {requested}")]
    OutsideBookingHorizon {
        requested: NaiveDate,
        first: NaiveDate,
        last: NaiveDate,
    },

    #[error("{time} is not an available time slot on {date}")]
    SlotUnavailable { date: NaiveDate, time: String },

    #[error("Invalid clinic schedule: {0}")]
    InvalidSchedule(String),

    #[error("{0}")]
    Store(String),
}

impl From<anyhow::Error> for AppointmentError {
    fn from(err: anyhow::Error) -> Self {
        AppointmentError::Store(err.to_string())
    }
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::InvalidSchedule(_) => AppError::Internal(err.to_string()),
            AppointmentError::Store(msg) => AppError::ExternalService(msg),
            _ => AppError::ValidationError(err.to_string()),
        }
    }
}

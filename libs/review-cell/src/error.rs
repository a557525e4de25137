use thiserror::Error;

use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(f64),

    #[error("{0}")]
    Store(String),

    #[error("Could not copy review text: {0}")]
    Clipboard(String),
}

impl From<anyhow::Error> for ReviewError {
    fn from(err: anyhow::Error) -> Self {
        ReviewError::Store(err.to_string())
    }
}

impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::Store(msg) => AppError::ExternalService(msg),
            ReviewError::Clipboard(_) => AppError::Internal(err.to_string()),
            _ => AppError::ValidationError(err.to_string()),
        }
    }
}

//! Booking form lifecycle without any rendering concerns.
//!
//! `Editing` is the only state that accepts a submission. A confirmed form
//! has already been reset to a blank draft; `book_another` reopens it.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::error::AppointmentError;
use crate::models::{AppointmentDraft, NewAppointment};
use crate::services::booking::BookingService;

#[derive(Debug, Clone, PartialEq)]
pub enum FormStatus {
    Editing,
    /// Blocking validation message; the store was not contacted.
    Rejected(String),
    /// Store or transport failure; fields are kept for a manual retry.
    Failed(String),
    Confirmed(NewAppointment),
}

#[derive(Debug, Clone)]
pub struct BookingForm {
    pub draft: AppointmentDraft,
    status: FormStatus,
}

impl BookingForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            draft: AppointmentDraft::for_date(today),
            status: FormStatus::Editing,
        }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self.status, FormStatus::Confirmed(_))
    }

    pub async fn submit(&mut self, service: &BookingService, now: NaiveDateTime) -> &FormStatus {
        if self.is_confirmed() {
            return &self.status;
        }

        self.status = match service.submit(&self.draft, now).await {
            Ok(appointment) => {
                self.draft = AppointmentDraft::for_date(now.date());
                FormStatus::Confirmed(appointment)
            }
            Err(AppointmentError::Store(message)) => {
                warn!("Appointment submission failed: {}", message);
                FormStatus::Failed(message)
            }
            Err(err) => FormStatus::Rejected(err.to_string()),
        };

        &self.status
    }

    pub fn book_another(&mut self, today: NaiveDate) {
        self.draft = AppointmentDraft::for_date(today);
        self.status = FormStatus::Editing;
    }
}

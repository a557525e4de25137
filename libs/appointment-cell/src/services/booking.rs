use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_utils::sanitize::{digits_only, non_blank};

use crate::error::AppointmentError;
use crate::models::{AgeInput, AppointmentDraft, Gender, NewAppointment, VisitReason};
use crate::services::availability::AvailabilityCalculator;

pub const APPOINTMENTS_TABLE: &str = "appointments";

pub struct BookingService {
    supabase: SupabaseClient,
    calculator: AvailabilityCalculator,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Result<Self, AppointmentError> {
        Ok(Self {
            supabase: SupabaseClient::new(config),
            calculator: AvailabilityCalculator::from_config(config)?,
        })
    }

    pub fn with_calculator(supabase: SupabaseClient, calculator: AvailabilityCalculator) -> Self {
        Self { supabase, calculator }
    }

    pub fn calculator(&self) -> &AvailabilityCalculator {
        &self.calculator
    }

    /// Checks a draft without touching the store.
    pub fn validate(&self, draft: &AppointmentDraft, now: NaiveDateTime) -> Result<NewAppointment, AppointmentError> {
        let mobile_number = digits_only(&draft.mobile_number);

        let (Some(full_name), Some(problem), Some(preferred_time)) = (
            non_blank(&draft.full_name),
            non_blank(&draft.problem),
            non_blank(&draft.preferred_time),
        ) else {
            return Err(AppointmentError::MissingRequiredFields);
        };
        if mobile_number.is_empty() {
            return Err(AppointmentError::MissingRequiredFields);
        }

        let problem: VisitReason = problem.parse().map_err(AppointmentError::InvalidField)?;

        let preferred_date = match non_blank(&draft.preferred_date) {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| AppointmentError::InvalidField(format!("Invalid preferred date: {}", raw)))?,
            None => now.date(),
        };

        let time = NaiveTime::parse_from_str(preferred_time, "%H:%M")
            .map_err(|_| AppointmentError::InvalidField(format!("Invalid preferred time: {}", preferred_time)))?;

        let age = parse_age(draft.age.as_ref())?;

        let gender = match non_blank(&draft.gender) {
            Some(raw) => Some(raw.parse::<Gender>().map_err(AppointmentError::InvalidField)?),
            None => None,
        };

        if mobile_number.len() != 10 {
            warn!("Mobile number for {} has {} digits", full_name, mobile_number.len());
        }

        if !self.calculator.is_bookable(now, preferred_date, time)? {
            return Err(AppointmentError::SlotUnavailable {
                date: preferred_date,
                time: preferred_time.to_string(),
            });
        }

        Ok(NewAppointment {
            full_name: full_name.to_string(),
            mobile_number,
            problem,
            preferred_date,
            preferred_time: time.format("%H:%M").to_string(),
            age,
            gender,
        })
    }

    /// Validates the draft and inserts exactly one row. Nothing is written
    /// when validation fails; store errors carry the store's own message.
    ///
    /// The row is not read back: patients' details are never selectable with
    /// the public key, so the accepted request itself is returned.
    pub async fn submit(&self, draft: &AppointmentDraft, now: NaiveDateTime) -> Result<NewAppointment, AppointmentError> {
        let appointment = self.validate(draft, now)?;
        debug!(
            "Submitting appointment request for {} on {} at {}",
            appointment.full_name, appointment.preferred_date, appointment.preferred_time
        );

        self.supabase
            .insert(APPOINTMENTS_TABLE, &appointment)
            .await?;

        info!("Appointment request stored for {} at {}", appointment.preferred_date, appointment.preferred_time);
        Ok(appointment)
    }
}

fn parse_age(age: Option<&AgeInput>) -> Result<Option<u8>, AppointmentError> {
    let value = match age {
        None => return Ok(None),
        Some(AgeInput::Number(n)) => *n,
        Some(AgeInput::Text(raw)) => match non_blank(raw) {
            None => return Ok(None),
            Some(raw) => raw
                .parse::<f64>()
                .map_err(|_| AppointmentError::InvalidField(format!("Invalid age: {}", raw)))?,
        },
    };

    if value.fract() != 0.0 || !(1.0..=120.0).contains(&value) {
        return Err(AppointmentError::InvalidField(format!("Invalid age: {}", value)));
    }

    Ok(Some(value as u8))
}

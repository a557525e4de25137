use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

// ==============================================================================
// VISIT DETAILS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitReason {
    #[serde(rename = "Neck Pain")]
    NeckPain,
    #[serde(rename = "Back Pain")]
    BackPain,
    #[serde(rename = "Knee Pain")]
    KneePain,
    #[serde(rename = "Shoulder Pain")]
    ShoulderPain,
    #[serde(rename = "Sports Injury")]
    SportsInjury,
    Other,
}

impl VisitReason {
    pub const ALL: [VisitReason; 6] = [
        VisitReason::NeckPain,
        VisitReason::BackPain,
        VisitReason::KneePain,
        VisitReason::ShoulderPain,
        VisitReason::SportsInjury,
        VisitReason::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VisitReason::NeckPain => "Neck Pain",
            VisitReason::BackPain => "Back Pain",
            VisitReason::KneePain => "Knee Pain",
            VisitReason::ShoulderPain => "Shoulder Pain",
            VisitReason::SportsInjury => "Sports Injury",
            VisitReason::Other => "Other",
        }
    }
}

impl fmt::Display for VisitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisitReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VisitReason::ALL
            .into_iter()
            .find(|reason| reason.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown reason for visit: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

// ==============================================================================
// BOOKING PAYLOADS
// ==============================================================================

/// Age as posted by a form: either a JSON number or the raw input text.
/// Range and integrality are checked during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgeInput {
    Number(f64),
    Text(String),
}

/// Appointment request exactly as the booking form posts it. Empty strings
/// mean the field was left blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentDraft {
    pub full_name: String,
    pub mobile_number: String,
    pub problem: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub age: Option<AgeInput>,
    pub gender: String,
}

impl AppointmentDraft {
    /// A blank form with the date preset to `today`.
    pub fn for_date(today: NaiveDate) -> Self {
        Self {
            preferred_date: today.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }
}

/// Validated row ready for insertion into `appointments`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAppointment {
    pub full_name: String,
    pub mobile_number: String,
    pub problem: VisitReason,
    pub preferred_date: NaiveDate,
    pub preferred_time: String,
    pub age: Option<u8>,
    pub gender: Option<Gender>,
}

// ==============================================================================
// AVAILABILITY
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    /// 24-hour `HH:MM`, the value stored as `preferred_time`.
    pub value: String,
    /// 12-hour display form, e.g. `5:30 PM`.
    pub label: String,
    #[serde(skip)]
    pub time: NaiveTime,
}

impl TimeSlot {
    pub fn at(time: NaiveTime) -> Self {
        Self {
            value: time.format("%H:%M").to_string(),
            label: time.format("%-I:%M %p").to_string(),
            time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotGroup {
    pub period: String,
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookableDate {
    pub date: NaiveDate,
    pub weekday: String,
    pub label: String,
    pub is_today: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlotQuery {
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DaySlotsResponse {
    pub date: NaiveDate,
    pub label: String,
    pub available: bool,
    pub periods: Vec<SlotGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

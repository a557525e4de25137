use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::prompt::ExternalReviewPrompt;

/// Primary key of a stored review. Older tables use a serial integer key,
/// newer ones a uuid; both are passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewId {
    Int(i64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ReviewId>,
    pub name: String,
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
}

/// Review as posted by the compose dialog. The rating is taken as any JSON
/// number and range-checked during validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewDraft {
    pub name: String,
    pub rating: Option<f64>,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReview {
    pub name: String,
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewListing {
    pub reviews: Vec<Review>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewSubmission {
    pub review: Review,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_prompt: Option<ExternalReviewPrompt>,
}

use serde::Serialize;
use tracing::warn;

use crate::error::ReviewError;
use crate::models::Review;

/// Ratings at or above this get nudged towards the public review platform.
pub const HIGH_RATING_THRESHOLD: u8 = 4;

/// Destination for the "copy your review" convenience. Implementations report
/// permission problems as an error message.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalReviewPrompt {
    pub url: String,
    pub text: String,
}

impl ExternalReviewPrompt {
    /// `None` for low ratings or when no review platform is configured.
    pub fn offer(review: &Review, platform_url: Option<&str>) -> Option<Self> {
        if review.rating < HIGH_RATING_THRESHOLD {
            return None;
        }

        platform_url.map(|url| Self {
            url: url.to_string(),
            text: review.comment.clone(),
        })
    }

    /// Best effort: a denied clipboard is reported once and never retried.
    pub fn copy_text(&self, clipboard: &mut dyn Clipboard) -> Result<(), ReviewError> {
        clipboard.write_text(&self.text).map_err(|reason| {
            warn!("Clipboard write refused: {}", reason);
            ReviewError::Clipboard(reason)
        })
    }
}

//! Local view of the testimonials section: the loaded list plus the state of
//! the compose dialog.

use chrono::NaiveDate;

use crate::error::ReviewError;
use crate::models::{Review, ReviewDraft};
use crate::prompt::ExternalReviewPrompt;
use crate::services::review::{sort_newest_first, ReviewService};

/// Reviews shown stacked before the rest scroll horizontally.
pub const FEATURED_COUNT: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct ReviewBoard {
    reviews: Vec<Review>,
    compose_open: bool,
    notice: Option<String>,
}

impl ReviewBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, service: &ReviewService) {
        let listing = service.list_reviews().await;
        self.reviews = listing.reviews;
        self.notice = listing.notice;
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn featured(&self) -> &[Review] {
        &self.reviews[..self.reviews.len().min(FEATURED_COUNT)]
    }

    pub fn more_reviews(&self) -> &[Review] {
        &self.reviews[self.reviews.len().min(FEATURED_COUNT)..]
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_compose_open(&self) -> bool {
        self.compose_open
    }

    pub fn open_compose(&mut self) {
        self.compose_open = true;
        self.notice = None;
    }

    /// On success the review joins the local list and the dialog closes; on
    /// failure the dialog stays open with a notice.
    pub async fn submit(
        &mut self,
        service: &ReviewService,
        draft: &ReviewDraft,
        today: NaiveDate,
    ) -> Result<Option<ExternalReviewPrompt>, ReviewError> {
        match service.post_review(draft, today).await {
            Ok(submission) => {
                self.reviews.insert(0, submission.review);
                sort_newest_first(&mut self.reviews);
                self.compose_open = false;
                self.notice = Some("Thank you for your review!".to_string());
                Ok(submission.external_prompt)
            }
            Err(err) => {
                self.notice = Some(match &err {
                    ReviewError::Store(msg) => format!("Failed to submit review: {}", msg),
                    other => other.to_string(),
                });
                Err(err)
            }
        }
    }
}

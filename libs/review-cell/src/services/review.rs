use chrono::NaiveDate;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_utils::sanitize::non_blank;

use crate::error::ReviewError;
use crate::models::{NewReview, Review, ReviewDraft, ReviewListing, ReviewSubmission};
use crate::prompt::ExternalReviewPrompt;

pub const REVIEWS_TABLE: &str = "reviews";

pub struct ReviewService {
    supabase: SupabaseClient,
    review_platform_url: Option<String>,
}

impl ReviewService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            review_platform_url: config.review_platform_url.clone(),
        }
    }

    /// All reviews, newest first.
    pub async fn fetch_reviews(&self) -> Result<Vec<Review>, ReviewError> {
        debug!("Fetching reviews");

        let mut reviews: Vec<Review> = self.supabase
            .select_ordered(REVIEWS_TABLE, "date", false)
            .await?;
        sort_newest_first(&mut reviews);

        debug!("Fetched {} reviews", reviews.len());
        Ok(reviews)
    }

    /// Like [`fetch_reviews`](Self::fetch_reviews) but degrades to an empty
    /// list with a notice for the reader.
    pub async fn list_reviews(&self) -> ReviewListing {
        match self.fetch_reviews().await {
            Ok(reviews) => ReviewListing { reviews, notice: None },
            Err(err) => {
                warn!("Failed to fetch reviews: {}", err);
                ReviewListing {
                    reviews: Vec::new(),
                    notice: Some(format!("Failed to fetch reviews: {}", err)),
                }
            }
        }
    }

    pub fn validate(&self, draft: &ReviewDraft, today: NaiveDate) -> Result<NewReview, ReviewError> {
        let (Some(name), Some(comment)) = (non_blank(&draft.name), non_blank(&draft.comment)) else {
            return Err(ReviewError::MissingFields);
        };

        let rating = draft.rating.ok_or(ReviewError::MissingFields)?;
        if rating.fract() != 0.0 || !(1.0..=5.0).contains(&rating) {
            return Err(ReviewError::InvalidRating(rating));
        }

        Ok(NewReview {
            name: name.to_string(),
            rating: rating as u8,
            comment: comment.to_string(),
            date: today,
        })
    }

    pub async fn post_review(&self, draft: &ReviewDraft, today: NaiveDate) -> Result<ReviewSubmission, ReviewError> {
        let new_review = self.validate(draft, today)?;

        let review: Review = self.supabase
            .insert_returning(REVIEWS_TABLE, &new_review)
            .await?;
        info!("Review posted with rating {}", review.rating);

        let external_prompt = ExternalReviewPrompt::offer(&review, self.review_platform_url.as_deref());

        Ok(ReviewSubmission { review, external_prompt })
    }
}

pub fn sort_newest_first(reviews: &mut [Review]) {
    reviews.sort_by(|a, b| b.date.cmp(&a.date));
}

use async_trait::async_trait;

use crate::review::application::domain::entities::{NewReview, Review};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewRepositoryError {
    /// A review already exists for this request.
    #[error("Request already reviewed")]
    Duplicate,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: NewReview) -> Result<Review, ReviewRepositoryError>;

    /// Inserts, or rewrites rating, title and text of the row already stored
    /// for `review.request_id`. Id, avatar and `created_at` are kept.
    async fn upsert_for_request(&self, review: NewReview) -> Result<Review, ReviewRepositoryError>;
}

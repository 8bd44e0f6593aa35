use async_trait::async_trait;

use crate::review::application::domain::entities::Review;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListReviewsError {
    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait ListReviewsUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<Review>, ListReviewsError>;
}

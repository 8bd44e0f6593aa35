use async_trait::async_trait;

use crate::review::application::domain::entities::Review;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ReviewQuery: Send + Sync {
    /// Newest first.
    async fn list(&self) -> Result<Vec<Review>, ReviewQueryError>;
}

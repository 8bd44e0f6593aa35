use async_trait::async_trait;
use uuid::Uuid;

use crate::review::application::domain::entities::Review;
use crate::service_request::application::domain::entities::{Actor, RequestReviewError};

#[derive(Debug, Clone)]
pub struct CreateReviewInput {
    pub request_id: Uuid,
    pub rating: i64,
    pub title: String,
    pub review: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateReviewError {
    #[error(transparent)]
    Invalid(#[from] RequestReviewError),

    #[error("Avatar must be an http(s) URL")]
    InvalidAvatar,

    #[error("Service request not found")]
    RequestNotFound,

    #[error("Only completed requests can be reviewed")]
    RequestNotCompleted,

    #[error("This request has already been reviewed")]
    AlreadyReviewed,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait CreateReviewUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Actor,
        input: CreateReviewInput,
    ) -> Result<Review, CreateReviewError>;
}

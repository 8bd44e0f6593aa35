use async_trait::async_trait;
use tracing::{error, info};

use crate::review::application::domain::entities::{NewReview, Review};
use crate::review::application::ports::incoming::use_cases::{
    CreateReviewError, CreateReviewInput, CreateReviewUseCase,
};
use crate::review::application::ports::outgoing::{ReviewRepository, ReviewRepositoryError};
use crate::service_request::application::domain::entities::{
    is_http_url, Actor, RequestReview, RequestStatus,
};
use crate::service_request::application::ports::outgoing::{
    ServiceRequestChanges, ServiceRequestQuery, ServiceRequestQueryError,
    ServiceRequestRepository,
};

pub struct CreateReviewService<Q, R, V>
where
    Q: ServiceRequestQuery,
    R: ServiceRequestRepository,
    V: ReviewRepository,
{
    requests: Q,
    request_repository: R,
    reviews: V,
}

impl<Q, R, V> CreateReviewService<Q, R, V>
where
    Q: ServiceRequestQuery,
    R: ServiceRequestRepository,
    V: ReviewRepository,
{
    pub fn new(requests: Q, request_repository: R, reviews: V) -> Self {
        Self {
            requests,
            request_repository,
            reviews,
        }
    }
}

fn checked_avatar(avatar: Option<String>) -> Result<Option<String>, CreateReviewError> {
    match avatar.map(|a| a.trim().to_string()).filter(|a| !a.is_empty()) {
        Some(url) if !is_http_url(&url) => Err(CreateReviewError::InvalidAvatar),
        other => Ok(other),
    }
}

#[async_trait]
impl<Q, R, V> CreateReviewUseCase for CreateReviewService<Q, R, V>
where
    Q: ServiceRequestQuery + Send + Sync,
    R: ServiceRequestRepository + Send + Sync,
    V: ReviewRepository + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        input: CreateReviewInput,
    ) -> Result<Review, CreateReviewError> {
        let content = RequestReview::new(input.rating, &input.title, &input.review)?;
        let avatar = checked_avatar(input.avatar)?;

        let request = self
            .requests
            .find_by_id(input.request_id)
            .await
            .map_err(|e| match e {
                ServiceRequestQueryError::NotFound => CreateReviewError::RequestNotFound,
                other => CreateReviewError::RepositoryError(other.to_string()),
            })?;

        if !request.is_owned_by(&actor.username) {
            return Err(CreateReviewError::RequestNotFound);
        }
        if request.status != RequestStatus::Completed {
            return Err(CreateReviewError::RequestNotCompleted);
        }
        if request.reviewed {
            return Err(CreateReviewError::AlreadyReviewed);
        }

        let review = self
            .reviews
            .create(NewReview::for_request(&request, &content, avatar))
            .await
            .map_err(|e| match e {
                ReviewRepositoryError::Duplicate => CreateReviewError::AlreadyReviewed,
                other => CreateReviewError::RepositoryError(other.to_string()),
            })?;

        self.request_repository
            .update(
                request.id,
                Some(RequestStatus::Completed),
                ServiceRequestChanges {
                    reviewed: Some(true),
                    review: Some(content),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| {
                error!(request_id = %request.id, review_id = %review.id, error = %e, "Review stored but request not marked");
                CreateReviewError::RepositoryError(e.to_string())
            })?;

        info!(review_id = %review.id, request_id = %request.id, rating = review.rating, "Review published");
        Ok(review)
    }
}

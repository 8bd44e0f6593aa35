use async_trait::async_trait;

use crate::review::application::domain::entities::Review;
use crate::review::application::ports::incoming::use_cases::{
    ListReviewsError, ListReviewsUseCase,
};
use crate::review::application::ports::outgoing::ReviewQuery;

pub struct ListReviewsService<Q>
where
    Q: ReviewQuery,
{
    query: Q,
}

impl<Q> ListReviewsService<Q>
where
    Q: ReviewQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> ListReviewsUseCase for ListReviewsService<Q>
where
    Q: ReviewQuery + Send + Sync,
{
    async fn execute(&self) -> Result<Vec<Review>, ListReviewsError> {
        self.query
            .list()
            .await
            .map_err(|e| ListReviewsError::QueryError(e.to_string()))
    }
}

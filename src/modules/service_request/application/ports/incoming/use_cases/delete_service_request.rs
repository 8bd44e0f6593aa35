use async_trait::async_trait;
use uuid::Uuid;

use crate::service_request::application::domain::entities::Actor;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeleteServiceRequestError {
    #[error("Service request not found")]
    NotFound,

    #[error("Only pending requests can be withdrawn")]
    NotPending,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait DeleteServiceRequestUseCase: Send + Sync {
    /// Returns the id of the removed request.
    async fn execute(&self, actor: Actor, id: Uuid) -> Result<Uuid, DeleteServiceRequestError>;
}

use async_trait::async_trait;

use crate::service_request::application::domain::entities::{
    Actor, ServiceRequest, ServiceRequestDraft, ServiceRequestDraftError,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateServiceRequestError {
    #[error(transparent)]
    Invalid(#[from] ServiceRequestDraftError),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait CreateServiceRequestUseCase: Send + Sync {
    /// Stores a new Pending request submitted by `actor`.
    async fn execute(
        &self,
        actor: Actor,
        draft: ServiceRequestDraft,
    ) -> Result<ServiceRequest, CreateServiceRequestError>;
}

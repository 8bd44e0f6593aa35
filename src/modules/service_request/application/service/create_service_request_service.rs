use async_trait::async_trait;
use tracing::info;

use crate::service_request::application::domain::entities::{
    Actor, ServiceRequest, ServiceRequestDraft,
};
use crate::service_request::application::ports::incoming::use_cases::{
    CreateServiceRequestError, CreateServiceRequestUseCase,
};
use crate::service_request::application::ports::outgoing::{
    NewServiceRequest, ServiceRequestRepository,
};

pub struct CreateServiceRequestService<R>
where
    R: ServiceRequestRepository,
{
    repository: R,
}

impl<R> CreateServiceRequestService<R>
where
    R: ServiceRequestRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> CreateServiceRequestUseCase for CreateServiceRequestService<R>
where
    R: ServiceRequestRepository + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        draft: ServiceRequestDraft,
    ) -> Result<ServiceRequest, CreateServiceRequestError> {
        let draft = draft.normalized()?;

        let created = self
            .repository
            .create(NewServiceRequest {
                username: actor.username,
                draft,
            })
            .await
            .map_err(|e| CreateServiceRequestError::RepositoryError(e.to_string()))?;

        info!(
            request_id = %created.id,
            username = %created.username,
            service_type = %created.service_type,
            "Service request submitted"
        );

        Ok(created)
    }
}

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::service_request::application::domain::entities::{Actor, RequestStatus};
use crate::service_request::application::ports::incoming::use_cases::{
    DeleteServiceRequestError, DeleteServiceRequestUseCase,
};
use crate::service_request::application::ports::outgoing::{
    ServiceRequestQuery, ServiceRequestQueryError, ServiceRequestRepository,
    ServiceRequestRepositoryError,
};

pub struct DeleteServiceRequestService<Q, R>
where
    Q: ServiceRequestQuery,
    R: ServiceRequestRepository,
{
    query: Q,
    repository: R,
}

impl<Q, R> DeleteServiceRequestService<Q, R>
where
    Q: ServiceRequestQuery,
    R: ServiceRequestRepository,
{
    pub fn new(query: Q, repository: R) -> Self {
        Self { query, repository }
    }
}

#[async_trait]
impl<Q, R> DeleteServiceRequestUseCase for DeleteServiceRequestService<Q, R>
where
    Q: ServiceRequestQuery + Send + Sync,
    R: ServiceRequestRepository + Send + Sync,
{
    async fn execute(&self, actor: Actor, id: Uuid) -> Result<Uuid, DeleteServiceRequestError> {
        let request = self.query.find_by_id(id).await.map_err(|e| match e {
            ServiceRequestQueryError::NotFound => DeleteServiceRequestError::NotFound,
            other => DeleteServiceRequestError::RepositoryError(other.to_string()),
        })?;

        if !actor.can_access(&request) {
            return Err(DeleteServiceRequestError::NotFound);
        }
        if !actor.is_admin() && request.status != RequestStatus::Pending {
            return Err(DeleteServiceRequestError::NotPending);
        }

        self.repository.delete(id).await.map_err(|e| match e {
            ServiceRequestRepositoryError::NotFound => DeleteServiceRequestError::NotFound,
            other => DeleteServiceRequestError::RepositoryError(other.to_string()),
        })?;

        info!(request_id = %id, by = %actor.username, "Service request deleted");
        Ok(id)
    }
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::service_request::application::domain::entities::{Actor, ServiceRequest};
use crate::service_request::application::ports::incoming::use_cases::{
    GetServiceRequestError, GetServiceRequestUseCase,
};
use crate::service_request::application::ports::outgoing::{
    ServiceRequestQuery, ServiceRequestQueryError,
};

pub struct GetServiceRequestService<Q>
where
    Q: ServiceRequestQuery,
{
    query: Q,
}

impl<Q> GetServiceRequestService<Q>
where
    Q: ServiceRequestQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> GetServiceRequestUseCase for GetServiceRequestService<Q>
where
    Q: ServiceRequestQuery + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        id: Uuid,
    ) -> Result<ServiceRequest, GetServiceRequestError> {
        let request = self.query.find_by_id(id).await.map_err(|e| match e {
            ServiceRequestQueryError::NotFound => GetServiceRequestError::NotFound,
            other => GetServiceRequestError::QueryError(other.to_string()),
        })?;

        // Someone else's request is reported as missing.
        if !actor.can_access(&request) {
            return Err(GetServiceRequestError::NotFound);
        }

        Ok(request)
    }
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::service_request::application::domain::entities::{Actor, ServiceRequest};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GetServiceRequestError {
    #[error("Service request not found")]
    NotFound,

    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait GetServiceRequestUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Actor,
        id: Uuid,
    ) -> Result<ServiceRequest, GetServiceRequestError>;
}

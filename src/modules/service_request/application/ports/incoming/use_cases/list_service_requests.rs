use async_trait::async_trait;

use crate::service_request::application::domain::entities::{Actor, ServiceRequest};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListServiceRequestsError {
    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait ListServiceRequestsUseCase: Send + Sync {
    /// `username` narrows the list for admins; clients always get their own.
    async fn execute(
        &self,
        actor: Actor,
        username: Option<String>,
    ) -> Result<Vec<ServiceRequest>, ListServiceRequestsError>;
}

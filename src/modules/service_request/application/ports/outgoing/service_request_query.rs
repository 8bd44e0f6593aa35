use async_trait::async_trait;
use uuid::Uuid;

use crate::service_request::application::domain::entities::ServiceRequest;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceRequestFilter {
    /// Exact match on the submitter
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceRequestQueryError {
    #[error("Service request not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[async_trait]
pub trait ServiceRequestQuery: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<ServiceRequest, ServiceRequestQueryError>;

    async fn find_by_invoice_id(
        &self,
        invoice_id: &str,
    ) -> Result<ServiceRequest, ServiceRequestQueryError>;

    /// Newest first.
    async fn list(
        &self,
        filter: ServiceRequestFilter,
    ) -> Result<Vec<ServiceRequest>, ServiceRequestQueryError>;
}

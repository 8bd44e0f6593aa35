use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::service_request::application::domain::entities::{
    RequestReview, RequestStatus, ServiceRequest, ServiceRequestDraft,
};
use crate::shared::api::PatchField;

//
// ──────────────────────────────────────────────────────────
// DTOs
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct NewServiceRequest {
    pub username: String,
    pub draft: ServiceRequestDraft,
}

/// Column-level changes for a single request.
///
/// - `progress` / `invoice_url`: Unset => keep, Null => clear, Value => set
/// - `invoice_urls`: replaces the whole list
/// - `paid_at`: also flips `paid` to true
/// - `payment_details`: provider payload kept with the payment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceRequestChanges {
    pub status: Option<RequestStatus>,
    pub progress: PatchField<u8>,
    pub invoice_url: PatchField<String>,
    pub invoice_urls: Option<Vec<String>>,
    pub invoice_id: Option<String>,
    pub reviewed: Option<bool>,
    pub review: Option<RequestReview>,
    pub paid_at: Option<DateTime<Utc>>,
    pub payment_details: Option<serde_json::Value>,
}

impl ServiceRequestChanges {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.progress.is_unset()
            && self.invoice_url.is_unset()
            && self.invoice_urls.is_none()
            && self.invoice_id.is_none()
            && self.reviewed.is_none()
            && self.review.is_none()
            && self.paid_at.is_none()
            && self.payment_details.is_none()
    }
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceRequestRepositoryError {
    #[error("Service request not found")]
    NotFound,

    /// The stored status no longer matches the one the change was based on.
    #[error("Service request status changed concurrently")]
    StatusConflict,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

//
// ──────────────────────────────────────────────────────────
// Port
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait ServiceRequestRepository: Send + Sync {
    async fn create(
        &self,
        data: NewServiceRequest,
    ) -> Result<ServiceRequest, ServiceRequestRepositoryError>;

    /// Applies `changes`. When `expected_status` is set the write only
    /// happens if the stored status still equals it.
    async fn update(
        &self,
        id: Uuid,
        expected_status: Option<RequestStatus>,
        changes: ServiceRequestChanges,
    ) -> Result<ServiceRequest, ServiceRequestRepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), ServiceRequestRepositoryError>;
}

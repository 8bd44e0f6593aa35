use async_trait::async_trait;
use uuid::Uuid;

use crate::service_request::application::domain::entities::{
    Actor, RequestReviewError, RequestStatus, ReviewInput, ServiceRequest,
};
use crate::shared::api::PatchField;

/// Allow-listed PATCH fields.
#[derive(Debug, Clone, Default)]
pub struct ServiceRequestPatch {
    pub status: Option<RequestStatus>,
    pub progress: PatchField<i64>,
    pub invoice_url: PatchField<String>,
    pub invoice_urls: Option<Vec<String>>,
    pub reviewed: Option<bool>,
    pub review: Option<ReviewInput>,
}

impl ServiceRequestPatch {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.progress.is_unset()
            && self.invoice_url.is_unset()
            && self.invoice_urls.is_none()
            && self.reviewed.is_none()
            && self.review.is_none()
    }

    /// First field a client owner is not allowed to touch.
    pub fn admin_only_field(&self) -> Option<&'static str> {
        if self.status.is_some() {
            Some("status")
        } else if !self.progress.is_unset() {
            Some("progress")
        } else if !self.invoice_url.is_unset() {
            Some("invoiceUrl")
        } else if self.invoice_urls.is_some() {
            Some("invoiceUrls")
        } else if self.reviewed.is_some() {
            Some("reviewed")
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatchServiceRequestError {
    #[error("Service request not found")]
    NotFound,

    #[error("Patch body contains no changes")]
    EmptyPatch,

    #[error("Field '{0}' can only be changed by the admin")]
    ForbiddenField(&'static str),

    #[error("Only completed requests can be reviewed")]
    RequestNotCompleted,

    #[error("Cannot move a request from {from} to {to}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },

    #[error("Progress must be between 0 and 100")]
    InvalidProgress,

    #[error("Progress can only be set while the request is Accepted")]
    ProgressNotAllowed,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    InvalidReview(#[from] RequestReviewError),

    #[error("Request was modified concurrently")]
    Modified,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}


#[async_trait]
pub trait PatchServiceRequestUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Actor,
        id: Uuid,
        patch: ServiceRequestPatch,
    ) -> Result<ServiceRequest, PatchServiceRequestError>;
}

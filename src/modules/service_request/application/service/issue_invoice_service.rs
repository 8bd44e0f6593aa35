use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

use crate::service_request::application::domain::entities::{RequestStatus, ServiceRequest};
use crate::service_request::application::ports::incoming::use_cases::{
    InvoiceRequest, IssueInvoiceError, IssueInvoiceUseCase,
};
use crate::service_request::application::ports::outgoing::{
    InvoiceDraft, InvoiceIssuer, ServiceRequestChanges, ServiceRequestQuery,
    ServiceRequestQueryError, ServiceRequestRepository, ServiceRequestRepositoryError,
};
use crate::shared::api::PatchField;

pub struct IssueInvoiceService<Q, R>
where
    Q: ServiceRequestQuery,
    R: ServiceRequestRepository,
{
    query: Q,
    repository: R,
    issuer: Arc<dyn InvoiceIssuer + Send + Sync>,
}

impl<Q, R> IssueInvoiceService<Q, R>
where
    Q: ServiceRequestQuery,
    R: ServiceRequestRepository,
{
    pub fn new(query: Q, repository: R, issuer: Arc<dyn InvoiceIssuer + Send + Sync>) -> Self {
        Self {
            query,
            repository,
            issuer,
        }
    }
}

#[async_trait]
impl<Q, R> IssueInvoiceUseCase for IssueInvoiceService<Q, R>
where
    Q: ServiceRequestQuery + Send + Sync,
    R: ServiceRequestRepository + Send + Sync,
{
    async fn execute(
        &self,
        id: Uuid,
        request: InvoiceRequest,
    ) -> Result<ServiceRequest, IssueInvoiceError> {
        let current = self.query.find_by_id(id).await.map_err(|e| match e {
            ServiceRequestQueryError::NotFound => IssueInvoiceError::NotFound,
            other => IssueInvoiceError::RepositoryError(other.to_string()),
        })?;

        if current.status != RequestStatus::Accepted {
            return Err(IssueInvoiceError::NotAccepted);
        }

        let draft = InvoiceDraft {
            request_id: id,
            recipient_email: request.email().to_string(),
            item_name: current.project_name.clone(),
            description: request
                .description()
                .map(str::to_string)
                .or_else(|| Some(current.service_type.clone())),
            amount: request.amount().to_string(),
            currency: request.currency().to_string(),
        };

        let issued = self.issuer.issue(&draft).await.map_err(|e| {
            error!(request_id = %id, error = %e, "Invoice provider call failed");
            IssueInvoiceError::ProviderError(e.to_string())
        })?;

        info!(request_id = %id, invoice_id = %issued.invoice_id, "Invoice issued");

        // Not conditional: the invoice already exists at the provider.
        self.repository
            .update(
                id,
                None,
                ServiceRequestChanges {
                    invoice_url: PatchField::Value(issued.invoice_url),
                    invoice_id: Some(issued.invoice_id),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| match e {
                ServiceRequestRepositoryError::NotFound => IssueInvoiceError::NotFound,
                other => IssueInvoiceError::RepositoryError(other.to_string()),
            })
    }
}

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use crate::service_request::application::ports::incoming::use_cases::{
    PaymentEvent, PaymentOutcome, RecordInvoicePaymentError, RecordInvoicePaymentUseCase,
    INVOICE_PAID_EVENT,
};
use crate::service_request::application::ports::outgoing::{
    ServiceRequestChanges, ServiceRequestQuery, ServiceRequestQueryError,
    ServiceRequestRepository,
};

pub struct RecordInvoicePaymentService<Q, R>
where
    Q: ServiceRequestQuery,
    R: ServiceRequestRepository,
{
    query: Q,
    repository: R,
}

impl<Q, R> RecordInvoicePaymentService<Q, R>
where
    Q: ServiceRequestQuery,
    R: ServiceRequestRepository,
{
    pub fn new(query: Q, repository: R) -> Self {
        Self { query, repository }
    }
}

#[async_trait]
impl<Q, R> RecordInvoicePaymentUseCase for RecordInvoicePaymentService<Q, R>
where
    Q: ServiceRequestQuery + Send + Sync,
    R: ServiceRequestRepository + Send + Sync,
{
    async fn execute(
        &self,
        event: PaymentEvent,
    ) -> Result<PaymentOutcome, RecordInvoicePaymentError> {
        if event.event_type != INVOICE_PAID_EVENT {
            return Ok(PaymentOutcome::Ignored);
        }

        let Some(invoice_id) = event.invoice_id else {
            warn!("Paid event without an invoice id");
            return Ok(PaymentOutcome::UnknownInvoice);
        };

        let request = match self.query.find_by_invoice_id(&invoice_id).await {
            Ok(request) => request,
            Err(ServiceRequestQueryError::NotFound) => {
                warn!(invoice_id = %invoice_id, "Payment for unknown invoice");
                return Ok(PaymentOutcome::UnknownInvoice);
            }
            Err(e) => return Err(RecordInvoicePaymentError::RepositoryError(e.to_string())),
        };

        if request.paid {
            return Ok(PaymentOutcome::AlreadyPaid(request.id));
        }

        self.repository
            .update(
                request.id,
                None,
                ServiceRequestChanges {
                    paid_at: Some(Utc::now()),
                    payment_details: event.resource,
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| RecordInvoicePaymentError::RepositoryError(e.to_string()))?;

        info!(request_id = %request.id, invoice_id = %invoice_id, "Invoice marked paid");
        Ok(PaymentOutcome::Recorded(request.id))
    }
}

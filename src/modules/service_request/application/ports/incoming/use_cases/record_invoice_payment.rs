use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

pub const INVOICE_PAID_EVENT: &str = "INVOICING.INVOICE.PAID";

/// The parts of a payment provider webhook this service reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentEvent {
    pub event_type: String,
    pub invoice_id: Option<String>,
    /// Event `resource`, kept with the request once paid
    pub resource: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Recorded(Uuid),
    AlreadyPaid(Uuid),
    UnknownInvoice,
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordInvoicePaymentError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait RecordInvoicePaymentUseCase: Send + Sync {
    async fn execute(&self, event: PaymentEvent)
        -> Result<PaymentOutcome, RecordInvoicePaymentError>;
}

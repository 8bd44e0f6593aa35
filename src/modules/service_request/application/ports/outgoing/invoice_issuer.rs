use async_trait::async_trait;
use uuid::Uuid;

/// Invoice to create and send through the payment provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub request_id: Uuid,
    pub recipient_email: String,
    pub item_name: String,
    pub description: Option<String>,
    /// Decimal string with two fraction digits, e.g. "150.00"
    pub amount: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedInvoice {
    pub invoice_id: String,
    /// Payer-facing page
    pub invoice_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvoiceIssuerError {
    #[error("Provider authentication failed: {0}")]
    Authentication(String),

    #[error("Provider rejected the invoice: {0}")]
    Rejected(String),

    #[error("Provider unreachable: {0}")]
    Transport(String),

    #[error("Unexpected provider response: {0}")]
    UnexpectedResponse(String),
}

#[async_trait]
pub trait InvoiceIssuer: Send + Sync {
    async fn issue(&self, draft: &InvoiceDraft) -> Result<IssuedInvoice, InvoiceIssuerError>;
}

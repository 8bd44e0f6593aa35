use async_trait::async_trait;
use email_address::EmailAddress;
use uuid::Uuid;

use crate::service_request::application::domain::entities::ServiceRequest;

pub const DEFAULT_CURRENCY: &str = "USD";

/// Admin input for an invoice, validated on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceRequest {
    email: String,
    amount: String,
    currency: String,
    description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvoiceRequestError {
    #[error("Invalid recipient email")]
    InvalidEmail,

    #[error("Amount must be a positive number")]
    InvalidAmount,

    #[error("Currency must be a three-letter ISO code")]
    InvalidCurrency,
}

impl InvoiceRequest {
    pub fn new(
        email: &str,
        amount: f64,
        currency: Option<&str>,
        description: Option<&str>,
    ) -> Result<Self, InvoiceRequestError> {
        let email = email.trim();
        if !EmailAddress::is_valid(email) {
            return Err(InvoiceRequestError::InvalidEmail);
        }
        if !amount.is_finite() || amount < 0.01 {
            return Err(InvoiceRequestError::InvalidAmount);
        }

        let currency = currency
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_ascii_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(InvoiceRequestError::InvalidCurrency);
        }

        Ok(Self {
            email: email.to_string(),
            amount: format!("{:.2}", amount),
            currency,
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IssueInvoiceError {
    #[error("Service request not found")]
    NotFound,

    #[error("Invoices can only be issued for accepted requests")]
    NotAccepted,

    #[error("Invoice provider error: {0}")]
    ProviderError(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait IssueInvoiceUseCase: Send + Sync {
    /// Creates and sends an invoice, then links it to the request.
    async fn execute(
        &self,
        id: Uuid,
        request: InvoiceRequest,
    ) -> Result<ServiceRequest, IssueInvoiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_request_defaults_and_formats() {
        let req = InvoiceRequest::new(" jane@example.com ", 150.0, None, Some("  ")).unwrap();
        assert_eq!(req.email(), "jane@example.com");
        assert_eq!(req.amount(), "150.00");
        assert_eq!(req.currency(), "USD");
        assert_eq!(req.description(), None);
    }

    #[test]
    fn test_invoice_request_normalizes_currency() {
        let req = InvoiceRequest::new("jane@example.com", 9.5, Some("eur"), Some("Logo")).unwrap();
        assert_eq!(req.currency(), "EUR");
        assert_eq!(req.amount(), "9.50");
        assert_eq!(req.description(), Some("Logo"));
    }

    #[test]
    fn test_invoice_request_rejects_bad_input() {
        assert_eq!(
            InvoiceRequest::new("nope", 10.0, None, None),
            Err(InvoiceRequestError::InvalidEmail)
        );
        assert_eq!(
            InvoiceRequest::new("jane@example.com", 0.0, None, None),
            Err(InvoiceRequestError::InvalidAmount)
        );
        assert_eq!(
            InvoiceRequest::new("jane@example.com", f64::NAN, None, None),
            Err(InvoiceRequestError::InvalidAmount)
        );
        assert_eq!(
            InvoiceRequest::new("jane@example.com", 10.0, Some("US"), None),
            Err(InvoiceRequestError::InvalidCurrency)
        );
    }
}

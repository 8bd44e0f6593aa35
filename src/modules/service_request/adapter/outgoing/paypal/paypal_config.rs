use std::env;

pub const SANDBOX_API_BASE: &str = "https://api-m.sandbox.paypal.com";
const DEFAULT_BUSINESS_NAME: &str = "Studio";

#[derive(Clone)]
pub struct PaypalConfig {
    pub client_id: String,
    pub client_secret: String,
    pub api_base: String,
    /// Shown as the invoicer on issued invoices
    pub business_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaypalConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("PAYPAL_API_BASE must be an https URL")]
    InvalidApiBase,
}

impl std::fmt::Debug for PaypalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaypalConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("api_base", &self.api_base)
            .field("business_name", &self.business_name)
            .finish()
    }
}

fn required(key: &'static str) -> Result<String, PaypalConfigError> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(PaypalConfigError::Missing(key))
}

impl PaypalConfig {
    pub fn from_env() -> Result<Self, PaypalConfigError> {
        let config = Self {
            client_id: required("PAYPAL_CLIENT_ID")?,
            client_secret: required("PAYPAL_CLIENT_SECRET")?,
            api_base: env::var("PAYPAL_API_BASE")
                .unwrap_or_else(|_| SANDBOX_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            business_name: env::var("PAYPAL_BUSINESS_NAME")
                .unwrap_or_else(|_| DEFAULT_BUSINESS_NAME.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PaypalConfigError> {
        if !self.api_base.starts_with("https://") {
            return Err(PaypalConfigError::InvalidApiBase);
        }
        Ok(())
    }

    pub fn is_sandbox(&self) -> bool {
        self.api_base.contains("sandbox")
    }

    /// Payer page used when the provider response carries no link.
    pub fn payer_view_url(&self, invoice_id: &str) -> String {
        let host = if self.is_sandbox() {
            "https://www.sandbox.paypal.com"
        } else {
            "https://www.paypal.com"
        };
        format!("{host}/invoice/payerView/details/{invoice_id}")
    }
}

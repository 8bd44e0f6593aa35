pub mod paypal_config;
pub mod paypal_invoice_issuer;

pub use paypal_config::{PaypalConfig, PaypalConfigError};
pub use paypal_invoice_issuer::{DisabledInvoiceIssuer, PaypalInvoiceIssuer};

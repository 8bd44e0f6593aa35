use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::paypal_config::PaypalConfig;
use crate::service_request::application::ports::outgoing::{
    InvoiceDraft, InvoiceIssuer, InvoiceIssuerError, IssuedInvoice,
};

const TERMS: &str = "Thank you for choosing us for your creative project!";

/// Creates and sends invoices through the PayPal Invoicing v2 API.
#[derive(Clone)]
pub struct PaypalInvoiceIssuer {
    http: Client,
    config: PaypalConfig,
}

#[derive(Deserialize)]
struct AccessToken {
    access_token: String,
}

impl PaypalInvoiceIssuer {
    pub fn new(config: PaypalConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base, path)
    }

    async fn access_token(&self) -> Result<String, InvoiceIssuerError> {
        let response = self
            .http
            .post(self.url("/v1/oauth2/token"))
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(InvoiceIssuerError::Authentication(format!(
                "token endpoint returned {status}"
            )));
        }

        let token: AccessToken = response
            .json()
            .await
            .map_err(|e| InvoiceIssuerError::Authentication(e.to_string()))?;
        Ok(token.access_token)
    }

    async fn create_draft(
        &self,
        token: &str,
        draft: &InvoiceDraft,
    ) -> Result<String, InvoiceIssuerError> {
        let response = self
            .http
            .post(self.url("/v2/invoicing/invoices"))
            .bearer_auth(token)
            .header("Accept", "application/json")
            .json(&invoice_payload(&self.config.business_name, draft))
            .send()
            .await
            .map_err(transport)?;

        let body = read_json(response, "create invoice").await?;

        if let Some(id) = created_invoice_id(&body) {
            return Ok(id);
        }

        // Some API versions answer with a HATEOAS link instead of the invoice.
        let href = body
            .get("href")
            .and_then(Value::as_str)
            .ok_or_else(|| InvoiceIssuerError::UnexpectedResponse("no invoice id".into()))?;

        let details = self
            .http
            .get(href)
            .bearer_auth(token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(transport)?;
        let details = read_json(details, "fetch created invoice").await?;

        created_invoice_id(&details)
            .ok_or_else(|| InvoiceIssuerError::UnexpectedResponse("no invoice id".into()))
    }

    async fn send(&self, token: &str, invoice_id: &str) -> Result<(), InvoiceIssuerError> {
        let response = self
            .http
            .post(self.url(&format!("/v2/invoicing/invoices/{invoice_id}/send")))
            .bearer_auth(token)
            .json(&json!({ "send_to_invoicer": true }))
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::OK | StatusCode::ACCEPTED | StatusCode::NO_CONTENT | StatusCode::CREATED => {
                Ok(())
            }
            status => Err(InvoiceIssuerError::Rejected(format!(
                "send invoice returned {status}"
            ))),
        }
    }

    /// Best effort: falls back to the well-known payer page.
    async fn payer_url(&self, token: &str, invoice_id: &str) -> String {
        let fetched = self
            .http
            .get(self.url(&format!("/v2/invoicing/invoices/{invoice_id}")))
            .bearer_auth(token)
            .header("Accept", "application/json")
            .send()
            .await;

        let body = match fetched {
            Ok(response) if response.status().is_success() => response.json::<Value>().await.ok(),
            Ok(response) => {
                warn!(invoice_id, status = %response.status(), "Could not read issued invoice");
                None
            }
            Err(e) => {
                warn!(invoice_id, error = %e, "Could not read issued invoice");
                None
            }
        };

        body.as_ref()
            .and_then(payer_view_link)
            .unwrap_or_else(|| self.config.payer_view_url(invoice_id))
    }
}

#[async_trait]
impl InvoiceIssuer for PaypalInvoiceIssuer {
    async fn issue(&self, draft: &InvoiceDraft) -> Result<IssuedInvoice, InvoiceIssuerError> {
        let token = self.access_token().await?;
        let invoice_id = self.create_draft(&token, draft).await?;
        debug!(invoice_id = %invoice_id, request_id = %draft.request_id, "PayPal draft created");

        self.send(&token, &invoice_id).await?;
        let invoice_url = self.payer_url(&token, &invoice_id).await;

        Ok(IssuedInvoice {
            invoice_id,
            invoice_url,
        })
    }
}

/// Stand-in when PayPal credentials are absent.
#[derive(Debug, Clone, Default)]
pub struct DisabledInvoiceIssuer;

#[async_trait]
impl InvoiceIssuer for DisabledInvoiceIssuer {
    async fn issue(&self, _draft: &InvoiceDraft) -> Result<IssuedInvoice, InvoiceIssuerError> {
        Err(InvoiceIssuerError::Authentication(
            "invoice provider is not configured".into(),
        ))
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn transport(e: reqwest::Error) -> InvoiceIssuerError {
    InvoiceIssuerError::Transport(e.to_string())
}

async fn read_json(response: Response, step: &str) -> Result<Value, InvoiceIssuerError> {
    let status = response.status();
    let body: Value = response
        .json()
        .await
        .map_err(|e| InvoiceIssuerError::UnexpectedResponse(format!("{step}: {e}")))?;

    if !status.is_success() {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("no message");
        return Err(InvoiceIssuerError::Rejected(format!(
            "{step} returned {status}: {message}"
        )));
    }
    Ok(body)
}

fn invoice_payload(business_name: &str, draft: &InvoiceDraft) -> Value {
    let note = draft.description.clone().unwrap_or_default();
    json!({
        "detail": {
            "currency_code": draft.currency,
            "note": note,
            "terms_and_conditions": TERMS,
            "reference": draft.request_id.to_string(),
        },
        "invoicer": {
            "business_name": business_name,
        },
        "primary_recipients": [
            { "billing_info": { "email_address": draft.recipient_email } }
        ],
        "items": [
            {
                "name": draft.item_name,
                "description": note,
                "quantity": "1",
                "unit_amount": {
                    "currency_code": draft.currency,
                    "value": draft.amount,
                },
            }
        ],
    })
}

fn created_invoice_id(body: &Value) -> Option<String> {
    body.get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

fn payer_view_link(body: &Value) -> Option<String> {
    if let Some(url) = body
        .pointer("/detail/metadata/recipient_view_url")
        .or_else(|| body.pointer("/metadata/recipient_view_url"))
        .and_then(Value::as_str)
    {
        return Some(url.to_string());
    }

    body.get("links")?
        .as_array()?
        .iter()
        .find(|l| l.get("rel").and_then(Value::as_str) == Some("payer-view"))
        .and_then(|l| l.get("href"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

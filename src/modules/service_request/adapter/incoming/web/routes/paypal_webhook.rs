use crate::api::schemas::ErrorResponse;
use crate::service_request::application::ports::incoming::use_cases::{
    PaymentEvent, PaymentOutcome,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpResponse, Responder};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookAck {
    #[schema(example = true)]
    pub received: bool,
}

/// Invoice id from `resource.invoice.id`, else `resource.id`. The whole
/// `resource` object rides along as the payment record.
fn payment_event(body: &Value) -> PaymentEvent {
    let invoice_id = body
        .pointer("/resource/invoice/id")
        .or_else(|| body.pointer("/resource/id"))
        .and_then(Value::as_str)
        .map(str::to_string);

    PaymentEvent {
        event_type: body
            .get("event_type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        invoice_id,
        resource: body.get("resource").cloned(),
    }
}

/// PayPal webhook receiver
///
/// Marks the matching request as paid on `INVOICING.INVOICE.PAID`. Every
/// event is acknowledged with a bare `{"received": true}`, outside the usual
/// envelope.
#[utoipa::path(
    post,
    path = "/api/paypal-webhook",
    tag = "service-requests",
    responses(
        (status = 200, description = "Event acknowledged", body = WebhookAck),
        (status = 500, description = "Payment could not be recorded; the provider will retry", body = ErrorResponse),
    )
)]
#[post("/api/paypal-webhook")]
pub async fn paypal_webhook_handler(
    body: web::Json<Value>,
    data: web::Data<AppState>,
) -> impl Responder {
    let event = payment_event(&body);
    let invoice_id = event.invoice_id.clone();

    match data.service_request.record_payment.execute(event).await {
        Ok(PaymentOutcome::Recorded(request_id)) => {
            info!(%request_id, invoice_id = ?invoice_id, "Invoice payment recorded");
        }
        Ok(PaymentOutcome::AlreadyPaid(request_id)) => {
            debug!(%request_id, "Duplicate payment notification");
        }
        Ok(PaymentOutcome::UnknownInvoice) => {
            debug!(invoice_id = ?invoice_id, "Acknowledged payment for unknown invoice");
        }
        Ok(PaymentOutcome::Ignored) => {}
        Err(e) => {
            error!(invoice_id = ?invoice_id, error = %e, "Failed to record payment");
            return ApiResponse::internal_error();
        }
    }

    HttpResponse::Ok().json(WebhookAck { received: true })
}

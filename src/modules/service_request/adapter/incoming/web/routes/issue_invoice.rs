use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::service_request::application::ports::incoming::use_cases::{
    InvoiceRequest, IssueInvoiceError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, info};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct IssueInvoiceDto {
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = 150.0)]
    pub amount: f64,
    /// ISO 4217 code, defaults to USD
    #[schema(example = "USD")]
    pub currency: Option<String>,
    pub description: Option<String>,
}

/// Issue a PayPal invoice for an accepted request
///
/// Stores the payer link as `invoiceUrl` and the provider id as `invoiceId`.
#[utoipa::path(
    post,
    path = "/api/service-requests/{id}/invoice",
    tag = "service-requests",
    params(("id" = Uuid, Path, description = "Service request id")),
    request_body = IssueInvoiceDto,
    security(("BearerAuth" = [])),
    responses(
        (
            status = 200,
            description = "Invoice sent",
            body = inline(crate::api::schemas::SuccessResponse<crate::service_request::application::domain::entities::ServiceRequest>)
        ),
        (status = 400, description = "Invalid email, amount or currency", body = ErrorResponse),
        (status = 403, description = "Caller is not the admin", body = ErrorResponse),
        (status = 404, description = "Unknown id", body = ErrorResponse),
        (status = 409, description = "Request is not Accepted", body = ErrorResponse),
        (
            status = 502,
            description = "Invoice provider failed",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "INVOICE_PROVIDER_ERROR", "message": "Could not create the invoice" }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/service-requests/{id}/invoice")]
pub async fn issue_invoice_handler(
    admin: AdminUser,
    path: web::Path<Uuid>,
    req: web::Json<IssueInvoiceDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();
    let dto = req.into_inner();

    let request = match InvoiceRequest::new(
        &dto.email,
        dto.amount,
        dto.currency.as_deref(),
        dto.description.as_deref(),
    ) {
        Ok(r) => r,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.service_request.issue_invoice.execute(id, request).await {
        Ok(updated) => {
            info!(request_id = %id, by = %admin.0.username, invoice_id = ?updated.invoice_id, "Invoice issued");
            ApiResponse::success(updated)
        }
        Err(IssueInvoiceError::NotFound) => {
            ApiResponse::not_found("SERVICE_REQUEST_NOT_FOUND", "Service request not found")
        }
        Err(e @ IssueInvoiceError::NotAccepted) => {
            ApiResponse::conflict("REQUEST_NOT_ACCEPTED", &e.to_string())
        }
        Err(IssueInvoiceError::ProviderError(e)) => {
            error!(request_id = %id, error = %e, "Invoice provider failed");
            ApiResponse::bad_gateway("INVOICE_PROVIDER_ERROR", "Could not create the invoice")
        }
        Err(IssueInvoiceError::RepositoryError(e)) => {
            error!(request_id = %id, error = %e, "Failed to store invoice details");
            ApiResponse::internal_error()
        }
    }
}

use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::service_request::application::domain::entities::{Actor, RequestStatus, ReviewInput};
use crate::service_request::application::ports::incoming::use_cases::{
    PatchServiceRequestError, ServiceRequestPatch,
};
use crate::shared::api::{ApiResponse, PatchField};
use crate::AppState;
use actix_web::{patch, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Allow-listed fields. Anything else is rejected before the handler runs.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatchServiceRequestDto {
    pub status: Option<RequestStatus>,
    /// 0-100, or null to clear
    #[serde(default)]
    #[schema(value_type = Option<i64>, example = 40)]
    pub progress: PatchField<i64>,
    /// http(s) URL, or null to clear
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub invoice_url: PatchField<String>,
    pub invoice_urls: Option<Vec<String>>,
    pub reviewed: Option<bool>,
    pub review: Option<ReviewInput>,
}

impl From<PatchServiceRequestDto> for ServiceRequestPatch {
    fn from(dto: PatchServiceRequestDto) -> Self {
        ServiceRequestPatch {
            status: dto.status,
            progress: dto.progress,
            invoice_url: dto.invoice_url,
            invoice_urls: dto.invoice_urls,
            reviewed: dto.reviewed,
            review: dto.review,
        }
    }
}

fn patch_error_response(id: Uuid, err: PatchServiceRequestError) -> HttpResponse {
    let message = err.to_string();
    match err {
        PatchServiceRequestError::NotFound => {
            ApiResponse::not_found("SERVICE_REQUEST_NOT_FOUND", "Service request not found")
        }
        PatchServiceRequestError::EmptyPatch => ApiResponse::bad_request("EMPTY_PATCH", &message),
        PatchServiceRequestError::ForbiddenField(_) => {
            ApiResponse::forbidden("FORBIDDEN_FIELD", &message)
        }
        PatchServiceRequestError::RequestNotCompleted => {
            ApiResponse::conflict("REQUEST_NOT_COMPLETED", &message)
        }
        PatchServiceRequestError::InvalidTransition { .. } => {
            ApiResponse::conflict("INVALID_STATUS_TRANSITION", &message)
        }
        PatchServiceRequestError::InvalidProgress => {
            ApiResponse::bad_request("INVALID_PROGRESS", &message)
        }
        PatchServiceRequestError::ProgressNotAllowed => {
            ApiResponse::conflict("PROGRESS_NOT_ALLOWED", &message)
        }
        PatchServiceRequestError::InvalidUrl(_) => ApiResponse::bad_request("INVALID_URL", &message),
        PatchServiceRequestError::InvalidReview(_) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &message)
        }
        PatchServiceRequestError::Modified => {
            warn!(request_id = %id, "Concurrent status change detected");
            ApiResponse::conflict("REQUEST_MODIFIED", &message)
        }
        PatchServiceRequestError::RepositoryError(e) => {
            error!(request_id = %id, error = %e, "Failed to update service request");
            ApiResponse::internal_error()
        }
    }
}

/// Update a service request
///
/// The admin drives `status`, `progress` and invoice links. The owning client
/// may only set `reviewed`/`review`, and only once the request is `Completed`.
#[utoipa::path(
    patch,
    path = "/api/service-requests/{id}",
    tag = "service-requests",
    params(("id" = Uuid, Path, description = "Service request id")),
    request_body = PatchServiceRequestDto,
    security(("BearerAuth" = [])),
    responses(
        (
            status = 200,
            description = "Updated request",
            body = inline(crate::api::schemas::SuccessResponse<crate::service_request::application::domain::entities::ServiceRequest>)
        ),
        (status = 400, description = "EMPTY_PATCH, INVALID_PROGRESS, INVALID_URL or VALIDATION_ERROR", body = ErrorResponse),
        (
            status = 403,
            description = "Client touched an admin-only field",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "FORBIDDEN_FIELD", "message": "Field 'status' can only be changed by the admin" }
            })
        ),
        (status = 404, description = "Unknown id, or owned by someone else", body = ErrorResponse),
        (status = 409, description = "INVALID_STATUS_TRANSITION, REQUEST_NOT_COMPLETED, PROGRESS_NOT_ALLOWED or REQUEST_MODIFIED", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[patch("/api/service-requests/{id}")]
pub async fn patch_service_request_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<PatchServiceRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();

    match data
        .service_request
        .patch
        .execute(Actor::from(&user), id, req.into_inner().into())
        .await
    {
        Ok(updated) => {
            info!(request_id = %id, by = %user.username, status = %updated.status, "Service request updated");
            ApiResponse::success(updated)
        }
        Err(e) => patch_error_response(id, e),
    }
}

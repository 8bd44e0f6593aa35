use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::service_request::application::domain::entities::Actor;
use crate::service_request::application::ports::incoming::use_cases::GetServiceRequestError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};
use tracing::error;
use uuid::Uuid;

/// Fetch a single service request
#[utoipa::path(
    get,
    path = "/api/service-requests/{id}",
    tag = "service-requests",
    params(("id" = Uuid, Path, description = "Service request id")),
    security(("BearerAuth" = [])),
    responses(
        (
            status = 200,
            description = "The request",
            body = inline(crate::api::schemas::SuccessResponse<crate::service_request::application::domain::entities::ServiceRequest>)
        ),
        (
            status = 404,
            description = "Unknown id, or owned by someone else",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "SERVICE_REQUEST_NOT_FOUND", "message": "Service request not found" }
            })
        ),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/service-requests/{id}")]
pub async fn get_service_request_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();

    match data
        .service_request
        .get
        .execute(Actor::from(&user), id)
        .await
    {
        Ok(request) => ApiResponse::success(request),
        Err(GetServiceRequestError::NotFound) => {
            ApiResponse::not_found("SERVICE_REQUEST_NOT_FOUND", "Service request not found")
        }
        Err(GetServiceRequestError::QueryError(e)) => {
            error!(request_id = %id, error = %e, "Failed to load service request");
            ApiResponse::internal_error()
        }
    }
}

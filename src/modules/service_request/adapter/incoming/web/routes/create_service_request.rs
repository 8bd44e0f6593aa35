use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::service_request::application::domain::entities::{Actor, ServiceRequestDraft};
use crate::service_request::application::ports::incoming::use_cases::CreateServiceRequestError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, warn};
use utoipa::ToSchema;

/// Client submission. Ownership and status are never taken from the body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateServiceRequestDto {
    #[serde(default)]
    #[schema(example = "Bakery website")]
    pub project_name: String,
    #[serde(default)]
    #[schema(example = "web-design")]
    pub service_type: String,
    #[serde(default)]
    #[schema(example = "A five page site with an order form")]
    pub description: String,
    #[schema(example = "6 weeks")]
    pub timeline: Option<String>,
    #[schema(example = "$2,000")]
    pub budget: Option<String>,
    pub additional_notes: Option<String>,
    #[serde(default)]
    #[schema(example = json!(["https://example.com/inspiration"]))]
    pub reference_links: Vec<String>,
}

impl From<CreateServiceRequestDto> for ServiceRequestDraft {
    fn from(dto: CreateServiceRequestDto) -> Self {
        ServiceRequestDraft {
            project_name: dto.project_name,
            service_type: dto.service_type,
            description: dto.description,
            timeline: dto.timeline,
            budget: dto.budget,
            additional_notes: dto.additional_notes,
            reference_links: dto.reference_links,
        }
    }
}

/// Submit a new service request
///
/// The request is stored as `Pending` and owned by the caller.
#[utoipa::path(
    post,
    path = "/api/service-requests",
    tag = "service-requests",
    request_body = CreateServiceRequestDto,
    security(("BearerAuth" = [])),
    responses(
        (
            status = 201,
            description = "Request submitted",
            body = inline(crate::api::schemas::SuccessResponse<crate::service_request::application::domain::entities::ServiceRequest>)
        ),
        (
            status = 400,
            description = "Missing field, bad reference link or unknown field",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "VALIDATION_ERROR", "message": "projectName is required" }
            })
        ),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/service-requests")]
pub async fn create_service_request_handler(
    user: AuthenticatedUser,
    req: web::Json<CreateServiceRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let actor = Actor::from(&user);

    match data
        .service_request
        .create
        .execute(actor, req.into_inner().into())
        .await
    {
        Ok(created) => ApiResponse::created(created),

        Err(CreateServiceRequestError::Invalid(e)) => {
            warn!(username = %user.username, error = %e, "Rejected service request");
            ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string())
        }

        Err(CreateServiceRequestError::RepositoryError(e)) => {
            error!(error = %e, "Failed to store service request");
            ApiResponse::internal_error()
        }
    }
}

use crate::api::schemas::ErrorResponse;
use crate::contact::application::domain::entities::ContactSubmission;
use crate::contact::application::ports::incoming::use_cases::SubmitContactMessageError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ContactMessageDto {
    #[serde(default)]
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "Project enquiry")]
    pub subject: String,
    #[serde(default)]
    #[schema(example = "I'd like a quote for a logo.")]
    pub message: String,
}

/// Send a message through the contact form
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = ContactMessageDto,
    responses(
        (
            status = 201,
            description = "Message stored",
            body = inline(crate::api::schemas::SuccessResponse<crate::contact::application::domain::entities::ContactMessage>)
        ),
        (
            status = 400,
            description = "Missing field or invalid email",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "VALIDATION_ERROR", "message": "subject is required" }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/contact")]
pub async fn submit_contact_message_handler(
    req: web::Json<ContactMessageDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let submission =
        match ContactSubmission::new(&dto.name, &dto.email, &dto.subject, &dto.message) {
            Ok(s) => s,
            Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
        };

    match data.contact.submit.execute(submission).await {
        Ok(message) => ApiResponse::created(message),
        Err(SubmitContactMessageError::RepositoryError(e)) => {
            error!(error = %e, "Failed to store contact message");
            ApiResponse::internal_error()
        }
    }
}

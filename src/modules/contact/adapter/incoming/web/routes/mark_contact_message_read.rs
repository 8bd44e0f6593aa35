use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::contact::application::ports::incoming::use_cases::MarkContactMessageReadError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{patch, web, Responder};
use tracing::error;
use uuid::Uuid;

/// Mark a contact message as read (admin)
#[utoipa::path(
    patch,
    path = "/api/contact/{id}/read",
    tag = "contact",
    params(("id" = Uuid, Path, description = "Message id")),
    security(("BearerAuth" = [])),
    responses(
        (
            status = 200,
            description = "Updated message",
            body = inline(crate::api::schemas::SuccessResponse<crate::contact::application::domain::entities::ContactMessage>)
        ),
        (status = 403, description = "Caller is not the admin", body = ErrorResponse),
        (status = 404, description = "Unknown message", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[patch("/api/contact/{id}/read")]
pub async fn mark_contact_message_read_handler(
    _admin: AdminUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();

    match data.contact.mark_read.execute(id).await {
        Ok(message) => ApiResponse::success(message),
        Err(MarkContactMessageReadError::NotFound) => {
            ApiResponse::not_found("MESSAGE_NOT_FOUND", "Message not found")
        }
        Err(MarkContactMessageReadError::RepositoryError(e)) => {
            error!(message_id = %id, error = %e, "Failed to mark message read");
            ApiResponse::internal_error()
        }
    }
}

use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::contact::application::ports::incoming::use_cases::ListContactMessagesError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};
use tracing::error;

/// Contact inbox, newest first (admin)
#[utoipa::path(
    get,
    path = "/api/contact",
    tag = "contact",
    security(("BearerAuth" = [])),
    responses(
        (
            status = 200,
            description = "All messages",
            body = inline(crate::api::schemas::SuccessResponse<Vec<crate::contact::application::domain::entities::ContactMessage>>)
        ),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not the admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/contact")]
pub async fn list_contact_messages_handler(
    _admin: AdminUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.contact.list.execute().await {
        Ok(messages) => ApiResponse::success(messages),
        Err(ListContactMessagesError::QueryError(e)) => {
            error!(error = %e, "Failed to list contact messages");
            ApiResponse::internal_error()
        }
    }
}

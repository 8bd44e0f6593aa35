use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::request_password_reset::{
    PasswordResetError, PasswordResetRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Either field identifies the account; `username` wins when both are set.
#[derive(Deserialize, ToSchema)]
pub struct PasswordResetRequestDto {
    #[schema(example = "jane_doe")]
    #[serde(default)]
    pub username: Option<String>,
    #[schema(example = "jane@example.com")]
    #[serde(default)]
    pub email: Option<String>,
}

/// Send a password reset code to the account's email
#[utoipa::path(
    post,
    path = "/api/auth/request-reset",
    tag = "auth",
    request_body = PasswordResetRequestDto,
    responses(
        (status = 200, description = "Code sent, masked address returned", body = inline(crate::api::schemas::SuccessResponse<crate::auth::application::use_cases::request_password_reset::PasswordResetResponse>)),
        (status = 400, description = "Neither username nor email given", body = ErrorResponse),
        (status = 404, description = "No matching account", body = ErrorResponse),
        (status = 502, description = "Email could not be delivered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/request-reset")]
pub async fn request_reset_handler(
    req: web::Json<PasswordResetRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();
    let request = match PasswordResetRequest::new(dto.username, dto.email) {
        Ok(r) => r,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.request_password_reset_use_case.execute(request).await {
        Ok(response) => {
            info!(masked_email = %response.masked_email, "Password reset code issued");
            ApiResponse::success(response)
        }

        Err(PasswordResetError::UserNotFound) => {
            warn!("Password reset requested for unknown account");
            ApiResponse::not_found("USER_NOT_FOUND", "No account matches the given identifier")
        }

        Err(PasswordResetError::DeliveryFailed(e)) => {
            error!(error = %e, "Password reset email delivery failed");
            ApiResponse::bad_gateway(
                "EMAIL_DELIVERY_FAILED",
                "Reset code could not be delivered. Please try again later.",
            )
        }

        Err(PasswordResetError::RepositoryError(e)) => {
            error!(error = %e, "Password reset failed");
            ApiResponse::internal_error()
        }
    }
}

use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::logout_user::{LogoutError, LogoutRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema, Default)]
pub struct LogoutRequestDto {
    /// Refresh token to revoke
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct LogoutResponseBody {
    #[schema(example = "Logged out successfully")]
    message: String,
}

/// Log out and revoke the refresh token
///
/// Always succeeds from the caller's point of view.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    request_body = LogoutRequestDto,
    responses(
        (status = 200, description = "Logged out", body = inline(crate::api::schemas::SuccessResponse<LogoutResponseBody>)),
        (status = 400, description = "Malformed body", body = ErrorResponse),
    )
)]
#[post("/api/auth/logout")]
pub async fn logout_user_handler(
    req: web::Json<LogoutRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = LogoutRequest::new(req.into_inner().refresh_token);

    match data.logout_user_use_case.execute(request).await {
        Ok(response) => {
            info!("User logged out");
            ApiResponse::success(LogoutResponseBody {
                message: response.message,
            })
        }

        Err(LogoutError::DatabaseError(ref e)) => {
            // The client drops its tokens regardless.
            error!(error = %e, "Token revocation failed during logout");
            ApiResponse::success(LogoutResponseBody {
                message: "Logged out successfully".to_string(),
            })
        }
    }
}

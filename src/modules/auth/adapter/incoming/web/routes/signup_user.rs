use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::signup_user::{SignupError, SignupRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct SignupRequestDto {
    /// 3-32 characters: letters, digits, `_`, `.`, `-`
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// At least 8 characters
    #[schema(example = "correct-horse")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct SignedUpUser {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: String,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
}

/// Create a client account
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body = SignupRequestDto,
    responses(
        (status = 201, description = "Account created", body = inline(crate::api::schemas::SuccessResponse<SignedUpUser>)),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Username or email taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/signup")]
pub async fn signup_user_handler(
    req: web::Json<SignupRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let request = match SignupRequest::new(dto.username, dto.email, dto.password) {
        Ok(r) => r,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.signup_user_use_case.execute(request).await {
        Ok(user) => {
            info!(user_id = %user.id, "Signup completed");
            ApiResponse::created(SignedUpUser {
                id: user.id.to_string(),
                username: user.username,
                email: user.email,
            })
        }
        Err(SignupError::UserAlreadyExists) => {
            warn!("Signup rejected: duplicate username or email");
            ApiResponse::conflict("USER_ALREADY_EXISTS", "Username or email already exists")
        }
        Err(e) => {
            error!(error = %e, "Signup failed");
            ApiResponse::internal_error()
        }
    }
}

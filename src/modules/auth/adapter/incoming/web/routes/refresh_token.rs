use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::refresh_token::{RefreshTokenError, RefreshTokenRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, warn};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct RefreshTokenRequestDto {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh_token: String,
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "auth",
    request_body = RefreshTokenRequestDto,
    responses(
        (status = 200, description = "New access token", body = inline(crate::api::schemas::SuccessResponse<crate::auth::application::use_cases::refresh_token::RefreshTokenResponse>)),
        (status = 400, description = "Missing token", body = ErrorResponse),
        (status = 401, description = "Invalid, expired or revoked token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/refresh")]
pub async fn refresh_token_handler(
    req: web::Json<RefreshTokenRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = match RefreshTokenRequest::new(req.into_inner().refresh_token) {
        Ok(r) => r,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.refresh_token_use_case.execute(request).await {
        Ok(response) => ApiResponse::success(response),

        Err(RefreshTokenError::TokenExpired) => {
            warn!("Token refresh failed: Token expired");
            ApiResponse::unauthorized(
                "TOKEN_EXPIRED",
                "Refresh token has expired. Please login again.",
            )
        }

        Err(RefreshTokenError::TokenRevoked) => {
            ApiResponse::unauthorized("TOKEN_REVOKED", "Refresh token has been revoked")
        }

        Err(RefreshTokenError::InvalidTokenType) => {
            warn!("Token refresh failed: Wrong token type");
            ApiResponse::unauthorized("INVALID_TOKEN_TYPE", "Please use a refresh token")
        }

        Err(
            RefreshTokenError::TokenInvalid
            | RefreshTokenError::InvalidSignature
            | RefreshTokenError::TokenNotYetValid,
        ) => {
            warn!("Token refresh failed: Invalid token");
            ApiResponse::unauthorized("INVALID_TOKEN", "Invalid refresh token")
        }

        Err(e @ RefreshTokenError::TokenGenerationFailed(_))
        | Err(e @ RefreshTokenError::RepositoryError(_)) => {
            error!(error = %e, "Token refresh failed");
            ApiResponse::internal_error()
        }
    }
}

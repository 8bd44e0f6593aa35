use super::verify_otp::otp_error_response;
use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::set_password::{SetPasswordError, SetPasswordRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, info};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct SetPasswordRequestDto {
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "4821")]
    pub otp: String,
    #[schema(example = "NewPassw0rd!")]
    pub new_password: String,
}

/// Replace the password using a valid reset code
///
/// The code is consumed on success.
#[utoipa::path(
    post,
    path = "/api/auth/set-password",
    tag = "auth",
    request_body = SetPasswordRequestDto,
    responses(
        (status = 200, description = "Password updated", body = inline(crate::api::schemas::SuccessResponse<crate::auth::application::use_cases::set_password::SetPasswordResponse>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Wrong or expired code", body = ErrorResponse),
        (status = 404, description = "No pending code", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/set-password")]
pub async fn set_password_handler(
    req: web::Json<SetPasswordRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();
    let request = match SetPasswordRequest::new(dto.email, dto.otp, dto.new_password) {
        Ok(r) => r,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.set_password_use_case.execute(request).await {
        Ok(response) => {
            info!("Password reset completed");
            ApiResponse::success(response)
        }
        Err(SetPasswordError::Otp(e)) => otp_error_response(&e),
        Err(e) => {
            error!(error = %e, "Set password failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::use_cases::set_password::{
        ISetPasswordUseCase, SetPasswordResponse,
    };
    use crate::auth::application::use_cases::verify_reset_otp::VerifyOtpError;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    #[derive(Clone)]
    struct MockSetPassword(Result<(), SetPasswordError>);

    #[async_trait]
    impl ISetPasswordUseCase for MockSetPassword {
        async fn execute(
            &self,
            _request: SetPasswordRequest,
        ) -> Result<SetPasswordResponse, SetPasswordError> {
            self.0.clone().map(|_| SetPasswordResponse {
                message: "Password updated".into(),
            })
        }
    }

    async fn call(mock: MockSetPassword, body: Value) -> (u16, Value) {
        let state = TestAppStateBuilder::default()
            .with_set_password(mock)
            .build();
        let app =
            test::init_service(App::new().app_data(state).service(set_password_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/set-password")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    fn body() -> Value {
        json!({"email": "jane@example.com", "otp": "4821", "new_password": "NewPassw0rd!"})
    }

    #[actix_web::test]
    async fn test_set_password_success() {
        let (status, body) = call(MockSetPassword(Ok(())), body()).await;

        assert_eq!(status, 200);
        assert_eq!(body["data"]["message"], "Password updated");
    }

    #[actix_web::test]
    async fn test_set_password_short_password() {
        let (status, body) = call(
            MockSetPassword(Ok(())),
            json!({"email": "jane@example.com", "otp": "4821", "new_password": "short"}),
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn test_set_password_expired_code() {
        let (status, body) = call(
            MockSetPassword(Err(SetPasswordError::Otp(VerifyOtpError::OtpExpired))),
            body(),
        )
        .await;

        assert_eq!(status, 401);
        assert_eq!(body["error"]["code"], "OTP_EXPIRED");
    }

    #[actix_web::test]
    async fn test_set_password_used_code() {
        let (status, body) = call(
            MockSetPassword(Err(SetPasswordError::Otp(VerifyOtpError::OtpNotFound))),
            body(),
        )
        .await;

        assert_eq!(status, 404);
        assert_eq!(body["error"]["code"], "OTP_NOT_FOUND");
    }
}

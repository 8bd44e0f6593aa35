use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::verify_reset_otp::{VerifyOtpError, VerifyOtpRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct VerifyOtpRequestDto {
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "4821")]
    pub otp: String,
}

/// Map an OTP failure onto its HTTP response.
pub(super) fn otp_error_response(err: &VerifyOtpError) -> HttpResponse {
    match err {
        VerifyOtpError::OtpNotFound => {
            ApiResponse::not_found("OTP_NOT_FOUND", "No pending reset code for this account")
        }
        VerifyOtpError::InvalidOtp => ApiResponse::unauthorized("INVALID_OTP", "Invalid reset code"),
        VerifyOtpError::OtpExpired => {
            ApiResponse::unauthorized("OTP_EXPIRED", "Reset code has expired")
        }
        VerifyOtpError::QueryError(e) | VerifyOtpError::RepositoryError(e) => {
            error!(error = %e, "Reset code check failed");
            ApiResponse::internal_error()
        }
    }
}

/// Check a password reset code without consuming it
#[utoipa::path(
    post,
    path = "/api/auth/verify-otp",
    tag = "auth",
    request_body = VerifyOtpRequestDto,
    responses(
        (status = 200, description = "Code is valid", body = inline(crate::api::schemas::SuccessResponse<crate::auth::application::use_cases::verify_reset_otp::VerifyOtpResponse>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Wrong or expired code", body = ErrorResponse),
        (status = 404, description = "No pending code", body = ErrorResponse),
    )
)]
#[post("/api/auth/verify-otp")]
pub async fn verify_otp_handler(
    req: web::Json<VerifyOtpRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();
    let request = match VerifyOtpRequest::new(dto.email, dto.otp) {
        Ok(r) => r,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.verify_reset_otp_use_case.execute(request).await {
        Ok(response) => ApiResponse::success(response),
        Err(e) => otp_error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::use_cases::verify_reset_otp::{
        IVerifyResetOtpUseCase, VerifyOtpResponse,
    };
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    #[derive(Clone)]
    struct MockVerify(Result<(), VerifyOtpError>);

    #[async_trait]
    impl IVerifyResetOtpUseCase for MockVerify {
        async fn execute(
            &self,
            _request: VerifyOtpRequest,
        ) -> Result<VerifyOtpResponse, VerifyOtpError> {
            self.0.clone().map(|_| VerifyOtpResponse { verified: true })
        }
    }

    async fn call(mock: MockVerify, body: Value) -> (u16, Value) {
        let state = TestAppStateBuilder::default()
            .with_verify_reset_otp(mock)
            .build();
        let app = test::init_service(App::new().app_data(state).service(verify_otp_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/verify-otp")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_verify_otp_success() {
        let (status, body) = call(
            MockVerify(Ok(())),
            json!({"email": "jane@example.com", "otp": "4821"}),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["data"]["verified"], true);
    }

    #[actix_web::test]
    async fn test_verify_otp_error_codes() {
        let cases = [
            (VerifyOtpError::OtpNotFound, 404, "OTP_NOT_FOUND"),
            (VerifyOtpError::InvalidOtp, 401, "INVALID_OTP"),
            (VerifyOtpError::OtpExpired, 401, "OTP_EXPIRED"),
        ];

        for (err, expected_status, expected_code) in cases {
            let (status, body) = call(
                MockVerify(Err(err)),
                json!({"email": "jane@example.com", "otp": "0000"}),
            )
            .await;
            assert_eq!(status, expected_status);
            assert_eq!(body["error"]["code"], expected_code);
        }
    }

    #[actix_web::test]
    async fn test_verify_otp_empty_code() {
        let (status, _) = call(
            MockVerify(Ok(())),
            json!({"email": "jane@example.com", "otp": ""}),
        )
        .await;
        assert_eq!(status, 400);
    }
}

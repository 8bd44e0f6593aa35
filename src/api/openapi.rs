use crate::api::schemas::{ErrorDetail, ErrorResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::auth::adapter::incoming::web::routes::{
    LoginRequestDto, LogoutRequestDto, LogoutResponseBody, PasswordResetRequestDto,
    RefreshTokenRequestDto, SetPasswordRequestDto, SignedUpUser, SignupRequestDto,
    VerifyOtpRequestDto,
};
use crate::auth::application::domain::entities::Role;
use crate::auth::application::use_cases::{
    login_user::{LoginUserResponse, UserInfo},
    refresh_token::RefreshTokenResponse,
    request_password_reset::PasswordResetResponse,
    set_password::SetPasswordResponse,
    verify_reset_otp::VerifyOtpResponse,
};
use crate::contact::adapter::incoming::web::routes::ContactMessageDto;
use crate::contact::application::domain::entities::ContactMessage;
use crate::review::adapter::incoming::web::routes::CreateReviewDto;
use crate::review::application::domain::entities::Review;
use crate::service_request::adapter::incoming::web::routes::{
    CreateServiceRequestDto, DeletedServiceRequest, IssueInvoiceDto, PatchServiceRequestDto,
    WebhookAck,
};
use crate::service_request::application::domain::entities::{
    RequestReview, RequestStatus, ReviewInput, ServiceRequest,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Studio Portal API",
        version = "1.0.0",
        description = "Client accounts, service requests, invoicing, reviews and the contact inbox",
    ),
    paths(
        // Auth
        crate::auth::adapter::incoming::web::routes::signup_user_handler,
        crate::auth::adapter::incoming::web::routes::login_user_handler,
        crate::auth::adapter::incoming::web::routes::refresh_token_handler,
        crate::auth::adapter::incoming::web::routes::logout_user_handler,
        crate::auth::adapter::incoming::web::routes::request_reset_handler,
        crate::auth::adapter::incoming::web::routes::verify_otp_handler,
        crate::auth::adapter::incoming::web::routes::set_password_handler,

        // Service requests
        crate::service_request::adapter::incoming::web::routes::create_service_request_handler,
        crate::service_request::adapter::incoming::web::routes::list_service_requests_handler,
        crate::service_request::adapter::incoming::web::routes::get_service_request_handler,
        crate::service_request::adapter::incoming::web::routes::patch_service_request_handler,
        crate::service_request::adapter::incoming::web::routes::delete_service_request_handler,
        crate::service_request::adapter::incoming::web::routes::issue_invoice_handler,
        crate::service_request::adapter::incoming::web::routes::paypal_webhook_handler,

        // Reviews
        crate::review::adapter::incoming::web::routes::create_review_handler,
        crate::review::adapter::incoming::web::routes::list_reviews_handler,

        // Contact
        crate::contact::adapter::incoming::web::routes::submit_contact_message_handler,
        crate::contact::adapter::incoming::web::routes::list_contact_messages_handler,
        crate::contact::adapter::incoming::web::routes::mark_contact_message_read_handler,
    ),
    components(
        schemas(
            ErrorResponse,
            ErrorDetail,

            // Auth
            Role,
            SignupRequestDto,
            SignedUpUser,
            LoginRequestDto,
            LoginUserResponse,
            UserInfo,
            RefreshTokenRequestDto,
            RefreshTokenResponse,
            LogoutRequestDto,
            LogoutResponseBody,
            PasswordResetRequestDto,
            PasswordResetResponse,
            VerifyOtpRequestDto,
            VerifyOtpResponse,
            SetPasswordRequestDto,
            SetPasswordResponse,

            // Service requests
            RequestStatus,
            RequestReview,
            ReviewInput,
            ServiceRequest,
            CreateServiceRequestDto,
            PatchServiceRequestDto,
            DeletedServiceRequest,
            IssueInvoiceDto,
            WebhookAck,

            // Reviews
            Review,
            CreateReviewDto,

            // Contact
            ContactMessage,
            ContactMessageDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Sign-up, login, tokens and password reset"),
        (name = "service-requests", description = "Client project requests and invoicing"),
        (name = "reviews", description = "Testimonials on completed requests"),
        (name = "contact", description = "Public contact form and admin inbox"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /api/auth/login"))
                        .build(),
                ),
            )
        }
    }
}

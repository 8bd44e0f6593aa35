use std::sync::Arc;

use actix_web::web;

use crate::auth::application::use_cases::{
    login_user::ILoginUserUseCase, logout_user::ILogoutUseCase,
    refresh_token::IRefreshTokenUseCase, request_password_reset::IRequestPasswordResetUseCase,
    set_password::ISetPasswordUseCase, signup_user::ISignupUserUseCase,
    verify_reset_otp::IVerifyResetOtpUseCase,
};
use crate::contact::application::contact_use_cases::ContactUseCases;
use crate::contact::application::service::{
    ListContactMessagesService, MarkContactMessageReadService, SubmitContactMessageService,
};
use crate::review::application::review_use_cases::ReviewUseCases;
use crate::review::application::service::{CreateReviewService, ListReviewsService};
use crate::service_request::application::service::{
    CreateServiceRequestService, DeleteServiceRequestService, GetServiceRequestService,
    IssueInvoiceService, ListServiceRequestsService, PatchServiceRequestService,
    RecordInvoicePaymentService,
};
use crate::service_request::application::service_request_use_cases::ServiceRequestUseCases;
use crate::tests::support::fakes::{
    InMemoryContactMessages, InMemoryReviews, InMemoryServiceRequests, RecordingInvoiceIssuer,
};
use crate::tests::support::stubs::StubAuthUseCase;
use crate::AppState;

/// Auth use cases default to [`StubAuthUseCase`]; the other modules run
/// their real services over in-memory stores.
pub struct TestAppStateBuilder {
    signup_user: Arc<dyn ISignupUserUseCase + Send + Sync>,
    login_user: Arc<dyn ILoginUserUseCase + Send + Sync>,
    refresh_token: Arc<dyn IRefreshTokenUseCase + Send + Sync>,
    logout_user: Arc<dyn ILogoutUseCase + Send + Sync>,
    request_password_reset: Arc<dyn IRequestPasswordResetUseCase + Send + Sync>,
    verify_reset_otp: Arc<dyn IVerifyResetOtpUseCase + Send + Sync>,
    set_password: Arc<dyn ISetPasswordUseCase + Send + Sync>,
    service_requests: InMemoryServiceRequests,
    invoice_issuer: RecordingInvoiceIssuer,
    reviews: InMemoryReviews,
    contact_messages: InMemoryContactMessages,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            signup_user: Arc::new(StubAuthUseCase),
            login_user: Arc::new(StubAuthUseCase),
            refresh_token: Arc::new(StubAuthUseCase),
            logout_user: Arc::new(StubAuthUseCase),
            request_password_reset: Arc::new(StubAuthUseCase),
            verify_reset_otp: Arc::new(StubAuthUseCase),
            set_password: Arc::new(StubAuthUseCase),
            service_requests: InMemoryServiceRequests::default(),
            invoice_issuer: RecordingInvoiceIssuer::default(),
            reviews: InMemoryReviews::default(),
            contact_messages: InMemoryContactMessages::default(),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_signup_user(mut self, uc: impl ISignupUserUseCase + 'static) -> Self {
        self.signup_user = Arc::new(uc);
        self
    }

    pub fn with_login_user(mut self, uc: impl ILoginUserUseCase + 'static) -> Self {
        self.login_user = Arc::new(uc);
        self
    }

    pub fn with_refresh_token(mut self, uc: impl IRefreshTokenUseCase + 'static) -> Self {
        self.refresh_token = Arc::new(uc);
        self
    }

    pub fn with_logout_user(mut self, uc: impl ILogoutUseCase + 'static) -> Self {
        self.logout_user = Arc::new(uc);
        self
    }

    pub fn with_request_password_reset(
        mut self,
        uc: impl IRequestPasswordResetUseCase + 'static,
    ) -> Self {
        self.request_password_reset = Arc::new(uc);
        self
    }

    pub fn with_verify_reset_otp(mut self, uc: impl IVerifyResetOtpUseCase + 'static) -> Self {
        self.verify_reset_otp = Arc::new(uc);
        self
    }

    pub fn with_set_password(mut self, uc: impl ISetPasswordUseCase + 'static) -> Self {
        self.set_password = Arc::new(uc);
        self
    }

    /// Shares `store` with the test so it can seed and inspect requests.
    pub fn with_service_request_store(mut self, store: InMemoryServiceRequests) -> Self {
        self.service_requests = store;
        self
    }

    pub fn with_invoice_issuer(mut self, issuer: RecordingInvoiceIssuer) -> Self {
        self.invoice_issuer = issuer;
        self
    }

    pub fn with_review_store(mut self, store: InMemoryReviews) -> Self {
        self.reviews = store;
        self
    }

    pub fn with_contact_store(mut self, store: InMemoryContactMessages) -> Self {
        self.contact_messages = store;
        self
    }

    fn service_request_use_cases(&self) -> ServiceRequestUseCases {
        let store = &self.service_requests;
        ServiceRequestUseCases {
            create: Arc::new(CreateServiceRequestService::new(store.clone())),
            list: Arc::new(ListServiceRequestsService::new(store.clone())),
            get: Arc::new(GetServiceRequestService::new(store.clone())),
            patch: Arc::new(PatchServiceRequestService::new(
                store.clone(),
                store.clone(),
                self.reviews.clone(),
            )),
            delete: Arc::new(DeleteServiceRequestService::new(store.clone(), store.clone())),
            issue_invoice: Arc::new(IssueInvoiceService::new(
                store.clone(),
                store.clone(),
                Arc::new(self.invoice_issuer.clone()),
            )),
            record_payment: Arc::new(RecordInvoicePaymentService::new(
                store.clone(),
                store.clone(),
            )),
        }
    }

    fn review_use_cases(&self) -> ReviewUseCases {
        ReviewUseCases {
            create: Arc::new(CreateReviewService::new(
                self.service_requests.clone(),
                self.service_requests.clone(),
                self.reviews.clone(),
            )),
            list: Arc::new(ListReviewsService::new(self.reviews.clone())),
        }
    }

    fn contact_use_cases(&self) -> ContactUseCases {
        let store = &self.contact_messages;
        ContactUseCases {
            submit: Arc::new(SubmitContactMessageService::new(store.clone())),
            list: Arc::new(ListContactMessagesService::new(store.clone())),
            mark_read: Arc::new(MarkContactMessageReadService::new(store.clone())),
        }
    }

    pub fn build(self) -> web::Data<AppState> {
        let service_request = self.service_request_use_cases();
        let review = self.review_use_cases();
        let contact = self.contact_use_cases();

        web::Data::new(AppState {
            signup_user_use_case: self.signup_user,
            login_user_use_case: self.login_user,
            refresh_token_use_case: self.refresh_token,
            logout_user_use_case: self.logout_user,
            request_password_reset_use_case: self.request_password_reset,
            verify_reset_otp_use_case: self.verify_reset_otp,
            set_password_use_case: self.set_password,
            service_request,
            review,
            contact,
        })
    }
}

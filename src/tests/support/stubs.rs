//! Placeholder auth use cases for route tests that never reach them.

use async_trait::async_trait;

use crate::auth::application::use_cases::login_user::{
    ILoginUserUseCase, LoginError, LoginRequest, LoginUserResponse,
};
use crate::auth::application::use_cases::logout_user::{
    ILogoutUseCase, LogoutError, LogoutRequest, LogoutResponse,
};
use crate::auth::application::use_cases::refresh_token::{
    IRefreshTokenUseCase, RefreshTokenError, RefreshTokenRequest, RefreshTokenResponse,
};
use crate::auth::application::use_cases::request_password_reset::{
    IRequestPasswordResetUseCase, PasswordResetError, PasswordResetRequest,
    PasswordResetResponse,
};
use crate::auth::application::use_cases::set_password::{
    ISetPasswordUseCase, SetPasswordError, SetPasswordRequest, SetPasswordResponse,
};
use crate::auth::application::use_cases::signup_user::{
    ISignupUserUseCase, SignupError, SignupRequest, SignupResponse,
};
use crate::auth::application::use_cases::verify_reset_otp::{
    IVerifyResetOtpUseCase, VerifyOtpError, VerifyOtpRequest, VerifyOtpResponse,
};

const UNAVAILABLE: &str = "stub: not configured for this test";

/// Fails every call with the use case's storage error.
#[derive(Clone, Copy, Default)]
pub struct StubAuthUseCase;

#[async_trait]
impl ISignupUserUseCase for StubAuthUseCase {
    async fn execute(&self, _request: SignupRequest) -> Result<SignupResponse, SignupError> {
        Err(SignupError::RepositoryError(UNAVAILABLE.into()))
    }
}

#[async_trait]
impl ILoginUserUseCase for StubAuthUseCase {
    async fn execute(&self, _request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        Err(LoginError::QueryError(UNAVAILABLE.into()))
    }
}

#[async_trait]
impl IRefreshTokenUseCase for StubAuthUseCase {
    async fn execute(
        &self,
        _request: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, RefreshTokenError> {
        Err(RefreshTokenError::RepositoryError(UNAVAILABLE.into()))
    }
}

#[async_trait]
impl ILogoutUseCase for StubAuthUseCase {
    async fn execute(&self, _request: LogoutRequest) -> Result<LogoutResponse, LogoutError> {
        Err(LogoutError::DatabaseError(UNAVAILABLE.into()))
    }
}

#[async_trait]
impl IRequestPasswordResetUseCase for StubAuthUseCase {
    async fn execute(
        &self,
        _request: PasswordResetRequest,
    ) -> Result<PasswordResetResponse, PasswordResetError> {
        Err(PasswordResetError::RepositoryError(UNAVAILABLE.into()))
    }
}

#[async_trait]
impl IVerifyResetOtpUseCase for StubAuthUseCase {
    async fn execute(
        &self,
        _request: VerifyOtpRequest,
    ) -> Result<VerifyOtpResponse, VerifyOtpError> {
        Err(VerifyOtpError::QueryError(UNAVAILABLE.into()))
    }
}

#[async_trait]
impl ISetPasswordUseCase for StubAuthUseCase {
    async fn execute(
        &self,
        _request: SetPasswordRequest,
    ) -> Result<SetPasswordResponse, SetPasswordError> {
        Err(SetPasswordError::RepositoryError(UNAVAILABLE.into()))
    }
}

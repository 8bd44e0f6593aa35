use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::auth::application::ports::outgoing::user_query::UserQueryResult;
use crate::auth::application::ports::outgoing::{UserQuery, UserRepository};
use crate::auth::application::services::otp::{check_otp, OtpCheck, OtpConfig};

// ========================= Request =========================
#[derive(Debug, Clone)]
pub struct VerifyOtpRequest {
    email: String,
    otp: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOtpRequestError {
    EmptyEmail,
    EmptyOtp,
}

impl std::fmt::Display for VerifyOtpRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerifyOtpRequestError::EmptyEmail => write!(f, "Email cannot be empty"),
            VerifyOtpRequestError::EmptyOtp => write!(f, "OTP cannot be empty"),
        }
    }
}

impl std::error::Error for VerifyOtpRequestError {}

impl VerifyOtpRequest {
    pub fn new(email: String, otp: String) -> Result<Self, VerifyOtpRequestError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(VerifyOtpRequestError::EmptyEmail);
        }
        let otp = otp.trim().to_string();
        if otp.is_empty() {
            return Err(VerifyOtpRequestError::EmptyOtp);
        }
        Ok(Self { email, otp })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn otp(&self) -> &str {
        &self.otp
    }
}

impl<'de> Deserialize<'de> for VerifyOtpRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            #[serde(default)]
            email: String,
            #[serde(default)]
            otp: String,
        }

        let helper = Helper::deserialize(deserializer)?;
        VerifyOtpRequest::new(helper.email, helper.otp).map_err(serde::de::Error::custom)
    }
}

// ====================== Error / Response =============================
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyOtpError {
    #[error("No pending reset code for this account")]
    OtpNotFound,

    #[error("Invalid reset code")]
    InvalidOtp,

    #[error("Reset code has expired")]
    OtpExpired,

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl VerifyOtpError {
    pub fn from_check(check: OtpCheck) -> Result<(), Self> {
        match check {
            OtpCheck::Valid => Ok(()),
            OtpCheck::Missing => Err(VerifyOtpError::OtpNotFound),
            OtpCheck::Mismatch => Err(VerifyOtpError::InvalidOtp),
            OtpCheck::Expired => Err(VerifyOtpError::OtpExpired),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VerifyOtpResponse {
    pub verified: bool,
}

/// Checks `submitted` against the user's pending code. Wrong guesses are
/// counted, and the code is dropped once `config.max_attempts` is reached.
pub(crate) async fn check_pending_code<R>(
    repository: &R,
    user: &UserQueryResult,
    submitted: &str,
    config: &OtpConfig,
) -> Result<(), VerifyOtpError>
where
    R: UserRepository + ?Sized,
{
    let check = check_otp(
        submitted,
        user.reset_otp_hash.as_deref(),
        user.reset_otp_expires_at,
        Utc::now(),
    );

    if check == OtpCheck::Mismatch {
        let dropped = repository
            .record_failed_otp_attempt(user.id, config.max_attempts)
            .await
            .map_err(|e| VerifyOtpError::RepositoryError(e.to_string()))?;
        if dropped {
            warn!(user_id = %user.id, "Reset code dropped after too many wrong attempts");
        }
    }

    VerifyOtpError::from_check(check)
}

// ============================ Use Case =============================
#[async_trait]
pub trait IVerifyResetOtpUseCase: Send + Sync {
    async fn execute(&self, request: VerifyOtpRequest)
        -> Result<VerifyOtpResponse, VerifyOtpError>;
}

#[derive(Clone)]
pub struct VerifyResetOtpUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    query: Q,
    repository: R,
    config: OtpConfig,
}

impl<Q, R> VerifyResetOtpUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    pub fn new(query: Q, repository: R, config: OtpConfig) -> Self {
        Self {
            query,
            repository,
            config,
        }
    }
}

#[async_trait]
impl<Q, R> IVerifyResetOtpUseCase for VerifyResetOtpUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(
        &self,
        request: VerifyOtpRequest,
    ) -> Result<VerifyOtpResponse, VerifyOtpError> {
        let user = self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| VerifyOtpError::QueryError(e.to_string()))?
            .ok_or(VerifyOtpError::OtpNotFound)?;

        let outcome =
            check_pending_code(&self.repository, &user, request.otp(), &self.config).await;

        if let Err(e) = &outcome {
            warn!(user_id = %user.id, reason = %e, "Reset code rejected");
        }
        outcome?;

        Ok(VerifyOtpResponse { verified: true })
    }
}

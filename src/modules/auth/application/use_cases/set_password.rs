use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::auth::application::ports::outgoing::{PasswordHasher, UserQuery, UserRepository};
use crate::auth::application::services::otp::OtpConfig;
use crate::auth::application::use_cases::signup_user::MIN_PASSWORD_LENGTH;
use crate::auth::application::use_cases::verify_reset_otp::{check_pending_code, VerifyOtpError};

// ========================= Request =========================
#[derive(Debug, Clone)]
pub struct SetPasswordRequest {
    email: String,
    otp: String,
    new_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetPasswordRequestError {
    EmptyEmail,
    EmptyOtp,
    PasswordTooShort,
}

impl std::fmt::Display for SetPasswordRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetPasswordRequestError::EmptyEmail => write!(f, "Email cannot be empty"),
            SetPasswordRequestError::EmptyOtp => write!(f, "OTP cannot be empty"),
            SetPasswordRequestError::PasswordTooShort => write!(
                f,
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            ),
        }
    }
}

impl std::error::Error for SetPasswordRequestError {}

impl SetPasswordRequest {
    pub fn new(
        email: String,
        otp: String,
        new_password: String,
    ) -> Result<Self, SetPasswordRequestError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(SetPasswordRequestError::EmptyEmail);
        }
        let otp = otp.trim().to_string();
        if otp.is_empty() {
            return Err(SetPasswordRequestError::EmptyOtp);
        }
        if new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(SetPasswordRequestError::PasswordTooShort);
        }

        Ok(Self {
            email,
            otp,
            new_password,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn otp(&self) -> &str {
        &self.otp
    }

    pub fn new_password(&self) -> &str {
        &self.new_password
    }
}

impl<'de> Deserialize<'de> for SetPasswordRequest {
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
            #[serde(default)]
            new_password: String,
        }

        let helper = Helper::deserialize(deserializer)?;
        SetPasswordRequest::new(helper.email, helper.otp, helper.new_password)
            .map_err(serde::de::Error::custom)
    }
}

// ====================== Error / Response =============================
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetPasswordError {
    #[error(transparent)]
    Otp(#[from] VerifyOtpError),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SetPasswordResponse {
    pub message: String,
}

// ============================ Use Case =============================
#[async_trait]
pub trait ISetPasswordUseCase: Send + Sync {
    async fn execute(
        &self,
        request: SetPasswordRequest,
    ) -> Result<SetPasswordResponse, SetPasswordError>;
}

#[derive(Clone)]
pub struct SetPasswordUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
    config: OtpConfig,
}

impl<Q, R> SetPasswordUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    pub fn new(
        query: Q,
        repository: R,
        password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
        config: OtpConfig,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
            config,
        }
    }
}

#[async_trait]
impl<Q, R> ISetPasswordUseCase for SetPasswordUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(
        &self,
        request: SetPasswordRequest,
    ) -> Result<SetPasswordResponse, SetPasswordError> {
        let user = self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| VerifyOtpError::QueryError(e.to_string()))?
            .ok_or(VerifyOtpError::OtpNotFound)?;

        if let Err(e) =
            check_pending_code(&self.repository, &user, request.otp(), &self.config).await
        {
            warn!(user_id = %user.id, reason = %e, "Password change rejected");
            return Err(e.into());
        }

        let password_hash = self
            .password_hasher
            .hash_password(request.new_password())
            .await
            .map_err(|e| SetPasswordError::HashingFailed(e.to_string()))?;

        // Clears the code as part of the same write.
        self.repository
            .update_password(user.id, password_hash)
            .await
            .map_err(|e| SetPasswordError::RepositoryError(e.to_string()))?;

        info!(user_id = %user.id, "Password changed through reset code");

        Ok(SetPasswordResponse {
            message: "Password updated successfully".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::services::token_hasher::hash_token;
    use crate::tests::support::fakes::{FakeHasher, InMemoryUsers};
    use chrono::{Duration, Utc};

    fn use_case(users: InMemoryUsers) -> SetPasswordUseCase<InMemoryUsers, InMemoryUsers> {
        SetPasswordUseCase::new(
            users.clone(),
            users,
            Arc::new(FakeHasher),
            OtpConfig::default(),
        )
    }

    fn users_with_otp(expires_in: Duration) -> InMemoryUsers {
        let users = InMemoryUsers::default();
        users.insert_user("alice", "alice@example.com", "hashed:old-password");
        users.set_otp("alice", hash_token("1234"), Utc::now() + expires_in);
        users
    }

    fn request(otp: &str) -> SetPasswordRequest {
        SetPasswordRequest::new("alice@example.com".into(), otp.into(), "new-password".into())
            .unwrap()
    }

    #[test]
    fn test_request_rejects_short_password() {
        assert_eq!(
            SetPasswordRequest::new("a@b.com".into(), "1234".into(), "short".into()).unwrap_err(),
            SetPasswordRequestError::PasswordTooShort
        );
    }

    #[tokio::test]
    async fn test_set_password_with_valid_code() {
        let users = users_with_otp(Duration::minutes(5));

        use_case(users.clone()).execute(request("1234")).await.unwrap();

        let stored = users.get_by_username("alice").unwrap();
        assert_eq!(stored.password_hash, "hashed:new-password");
        assert!(stored.reset_otp_hash.is_none());
        assert!(stored.reset_otp_expires_at.is_none());
    }

    #[tokio::test]
    async fn test_code_cannot_be_reused() {
        let users = users_with_otp(Duration::minutes(5));
        let use_case = use_case(users);

        use_case.execute(request("1234")).await.unwrap();
        let second = use_case.execute(request("1234")).await;

        assert_eq!(
            second.unwrap_err(),
            SetPasswordError::Otp(VerifyOtpError::OtpNotFound)
        );
    }

    #[tokio::test]
    async fn test_expired_code_keeps_old_password() {
        let users = users_with_otp(Duration::seconds(-30));

        let result = use_case(users.clone()).execute(request("1234")).await;

        assert_eq!(
            result.unwrap_err(),
            SetPasswordError::Otp(VerifyOtpError::OtpExpired)
        );
        assert_eq!(
            users.get_by_username("alice").unwrap().password_hash,
            "hashed:old-password"
        );
    }

    #[tokio::test]
    async fn test_wrong_code() {
        let users = users_with_otp(Duration::minutes(5));
        let result = use_case(users).execute(request("4321")).await;
        assert_eq!(
            result.unwrap_err(),
            SetPasswordError::Otp(VerifyOtpError::InvalidOtp)
        );
    }

    #[tokio::test]
    async fn test_wrong_codes_use_up_the_reset() {
        let users = users_with_otp(Duration::minutes(5));
        let use_case = use_case(users.clone());

        for _ in 0..OtpConfig::default().max_attempts {
            let _ = use_case.execute(request("4321")).await;
        }
        let result = use_case.execute(request("1234")).await;

        assert_eq!(
            result.unwrap_err(),
            SetPasswordError::Otp(VerifyOtpError::OtpNotFound)
        );
        assert_eq!(
            users.get_by_username("alice").unwrap().password_hash,
            "hashed:old-password"
        );
    }
}

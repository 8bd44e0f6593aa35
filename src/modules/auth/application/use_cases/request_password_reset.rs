use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::auth::application::ports::outgoing::{UserQuery, UserRepository};
use crate::auth::application::services::otp::{generate_otp, mask_email, OtpConfig};
use crate::email::application::ports::outgoing::PasswordResetNotifier;

// ========================= Request =========================
/// Reset is requested by username or by email; username wins when both are sent.
#[derive(Debug, Clone)]
pub enum PasswordResetRequest {
    ByUsername(String),
    ByEmail(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordResetRequestError {
    MissingIdentifier,
}

impl std::fmt::Display for PasswordResetRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PasswordResetRequestError::MissingIdentifier => {
                write!(f, "Either username or email is required")
            }
        }
    }
}

impl std::error::Error for PasswordResetRequestError {}

impl PasswordResetRequest {
    pub fn new(
        username: Option<String>,
        email: Option<String>,
    ) -> Result<Self, PasswordResetRequestError> {
        let non_blank = |v: Option<String>| {
            v.map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        match (non_blank(username), non_blank(email)) {
            (Some(username), _) => Ok(Self::ByUsername(username)),
            (None, Some(email)) => Ok(Self::ByEmail(email.to_lowercase())),
            (None, None) => Err(PasswordResetRequestError::MissingIdentifier),
        }
    }
}

impl<'de> Deserialize<'de> for PasswordResetRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            #[serde(default)]
            username: Option<String>,
            #[serde(default)]
            email: Option<String>,
        }

        let helper = Helper::deserialize(deserializer)?;
        PasswordResetRequest::new(helper.username, helper.email).map_err(serde::de::Error::custom)
    }
}

// ====================== Error / Response =============================
#[derive(Debug, Clone, thiserror::Error)]
pub enum PasswordResetError {
    #[error("User not found")]
    UserNotFound,

    #[error("Reset code could not be delivered: {0}")]
    DeliveryFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PasswordResetResponse {
    pub masked_email: String,
}

// ============================ Use Case =============================
#[async_trait]
pub trait IRequestPasswordResetUseCase: Send + Sync {
    async fn execute(
        &self,
        request: PasswordResetRequest,
    ) -> Result<PasswordResetResponse, PasswordResetError>;
}

#[derive(Clone)]
pub struct RequestPasswordResetUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    query: Q,
    repository: R,
    notifier: Arc<dyn PasswordResetNotifier + Send + Sync>,
    config: OtpConfig,
}

impl<Q, R> RequestPasswordResetUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    pub fn new(
        query: Q,
        repository: R,
        notifier: Arc<dyn PasswordResetNotifier + Send + Sync>,
        config: OtpConfig,
    ) -> Self {
        Self {
            query,
            repository,
            notifier,
            config,
        }
    }
}

#[async_trait]
impl<Q, R> IRequestPasswordResetUseCase for RequestPasswordResetUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(
        &self,
        request: PasswordResetRequest,
    ) -> Result<PasswordResetResponse, PasswordResetError> {
        let found = match &request {
            PasswordResetRequest::ByUsername(username) => {
                self.query.find_by_username(username).await
            }
            PasswordResetRequest::ByEmail(email) => self.query.find_by_email(email).await,
        }
        .map_err(|e| PasswordResetError::RepositoryError(e.to_string()))?;

        let Some(user) = found else {
            warn!(?request, "Password reset requested for unknown account");
            return Err(PasswordResetError::UserNotFound);
        };

        // A new code replaces any pending one.
        let otp = generate_otp();
        let expires_at = self.config.expires_at(Utc::now());

        self.repository
            .set_reset_otp(user.id, otp.code_hash, expires_at)
            .await
            .map_err(|e| PasswordResetError::RepositoryError(e.to_string()))?;

        self.notifier
            .send_reset_code(
                &user.email,
                &user.username,
                &otp.code,
                self.config.ttl_seconds / 60,
            )
            .await
            .map_err(|e| PasswordResetError::DeliveryFailed(e.to_string()))?;

        info!(user_id = %user.id, "Password reset code issued");

        Ok(PasswordResetResponse {
            masked_email: mask_email(&user.email),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::services::token_hasher::hash_token;
    use crate::tests::support::fakes::{InMemoryUsers, RecordingResetNotifier};

    fn use_case(
        users: InMemoryUsers,
        notifier: RecordingResetNotifier,
    ) -> RequestPasswordResetUseCase<InMemoryUsers, InMemoryUsers> {
        RequestPasswordResetUseCase::new(
            users.clone(),
            users,
            Arc::new(notifier),
            OtpConfig::default(),
        )
    }

    #[test]
    fn test_request_requires_identifier() {
        assert_eq!(
            PasswordResetRequest::new(None, Some("  ".into())).unwrap_err(),
            PasswordResetRequestError::MissingIdentifier
        );
        assert!(matches!(
            PasswordResetRequest::new(Some("alice".into()), Some("a@b.com".into())),
            Ok(PasswordResetRequest::ByUsername(u)) if u == "alice"
        ));
    }

    #[tokio::test]
    async fn test_reset_by_username_stores_hash_and_sends_code() {
        let users = InMemoryUsers::default();
        users.insert_user("jonathan", "jonathan@example.com", "hashed:x");
        let notifier = RecordingResetNotifier::default();

        let response = use_case(users.clone(), notifier.clone())
            .execute(PasswordResetRequest::ByUsername("jonathan".into()))
            .await
            .unwrap();

        assert_eq!(response.masked_email, "j***than@example.com");

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        let (to, code) = &sent[0];
        assert_eq!(to, "jonathan@example.com");
        assert_eq!(code.len(), 4);

        let stored = users.get_by_username("jonathan").unwrap();
        assert_eq!(stored.reset_otp_hash.as_deref(), Some(hash_token(code).as_str()));
        assert!(stored.reset_otp_expires_at.unwrap() > Utc::now());
    }

    #[tokio::test]
    async fn test_reset_by_email() {
        let users = InMemoryUsers::default();
        users.insert_user("alice", "alice@example.com", "hashed:x");

        let result = use_case(users, RecordingResetNotifier::default())
            .execute(PasswordResetRequest::ByEmail("alice@example.com".into()))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_reset_unknown_user() {
        let notifier = RecordingResetNotifier::default();
        let result = use_case(InMemoryUsers::default(), notifier.clone())
            .execute(PasswordResetRequest::ByEmail("ghost@example.com".into()))
            .await;

        assert!(matches!(result, Err(PasswordResetError::UserNotFound)));
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_reset_delivery_failure() {
        let users = InMemoryUsers::default();
        users.insert_user("alice", "alice@example.com", "hashed:x");

        let result = use_case(users, RecordingResetNotifier::failing())
            .execute(PasswordResetRequest::ByUsername("alice".into()))
            .await;

        assert!(matches!(result, Err(PasswordResetError::DeliveryFailed(_))));
    }
}

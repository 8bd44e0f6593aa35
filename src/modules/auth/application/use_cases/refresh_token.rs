use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::auth::application::ports::outgoing::{
    TokenError, TokenProvider, TokenRepository, TokenRepositoryError,
};
use crate::auth::application::services::token_hasher::hash_token;

// ========================= Refresh Token Request =========================
/// Validated refresh token request
#[derive(Debug, Clone)]
pub struct RefreshTokenRequest {
    refresh_token: String,
}

#[derive(Debug, Clone)]
pub enum RefreshTokenRequestError {
    EmptyToken,
}

impl std::fmt::Display for RefreshTokenRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefreshTokenRequestError::EmptyToken => write!(f, "Refresh token cannot be empty"),
        }
    }
}

impl std::error::Error for RefreshTokenRequestError {}

impl RefreshTokenRequest {
    pub fn new(refresh_token: String) -> Result<Self, RefreshTokenRequestError> {
        if refresh_token.trim().is_empty() {
            return Err(RefreshTokenRequestError::EmptyToken);
        }

        Ok(Self {
            refresh_token: refresh_token.trim().to_string(),
        })
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }
}

impl<'de> Deserialize<'de> for RefreshTokenRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RefreshTokenRequestHelper {
            refresh_token: String,
        }

        let helper = RefreshTokenRequestHelper::deserialize(deserializer)?;
        RefreshTokenRequest::new(helper.refresh_token).map_err(serde::de::Error::custom)
    }
}

// ====================== Refresh Token Error =============================
#[derive(Debug, Clone)]
pub enum RefreshTokenError {
    TokenExpired,
    TokenInvalid,
    TokenNotYetValid,
    InvalidTokenType,
    InvalidSignature,
    TokenRevoked,
    TokenGenerationFailed(String),
    RepositoryError(String),
}

impl std::fmt::Display for RefreshTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefreshTokenError::TokenExpired => write!(f, "Refresh token has expired"),
            RefreshTokenError::TokenInvalid => write!(f, "Invalid refresh token"),
            RefreshTokenError::TokenNotYetValid => write!(f, "Token is not yet valid"),
            RefreshTokenError::InvalidTokenType => write!(f, "Invalid token type"),
            RefreshTokenError::InvalidSignature => write!(f, "Invalid token signature"),
            RefreshTokenError::TokenRevoked => write!(f, "Refresh token has been revoked"),
            RefreshTokenError::TokenGenerationFailed(msg) => {
                write!(f, "Token generation failed: {}", msg)
            }
            RefreshTokenError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for RefreshTokenError {}

impl From<TokenError> for RefreshTokenError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::TokenExpired => RefreshTokenError::TokenExpired,
            TokenError::TokenNotYetValid => RefreshTokenError::TokenNotYetValid,
            TokenError::InvalidTokenType(_) => RefreshTokenError::InvalidTokenType,
            TokenError::InvalidSignature => RefreshTokenError::InvalidSignature,
            TokenError::MalformedToken => RefreshTokenError::TokenInvalid,
            TokenError::EncodingError(msg) => RefreshTokenError::TokenGenerationFailed(msg),
        }
    }
}

impl From<TokenRepositoryError> for RefreshTokenError {
    fn from(error: TokenRepositoryError) -> Self {
        RefreshTokenError::RepositoryError(error.to_string())
    }
}

// ============================ Refresh Token Response =========================
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RefreshTokenResponse {
    pub access_token: String,
}

// ============================ Refresh Token Use Case =============================
#[async_trait]
pub trait IRefreshTokenUseCase: Send + Sync {
    async fn execute(
        &self,
        request: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, RefreshTokenError>;
}

#[derive(Clone)]
pub struct RefreshTokenUseCase<R>
where
    R: TokenRepository + Send + Sync,
{
    token_repository: R,
    token_provider: Arc<dyn TokenProvider + Send + Sync>,
}

impl<R> RefreshTokenUseCase<R>
where
    R: TokenRepository + Send + Sync,
{
    pub fn new(token_repository: R, token_provider: Arc<dyn TokenProvider + Send + Sync>) -> Self {
        Self {
            token_repository,
            token_provider,
        }
    }
}

#[async_trait]
impl<R> IRefreshTokenUseCase for RefreshTokenUseCase<R>
where
    R: TokenRepository + Send + Sync,
{
    async fn execute(
        &self,
        request: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, RefreshTokenError> {
        // 1️⃣ Verify and decode refresh token
        let claims = self.token_provider.verify_token(request.refresh_token())?;

        // 2️⃣ Ensure it's a refresh token
        if claims.token_type != "refresh" {
            return Err(RefreshTokenError::InvalidTokenType);
        }

        // 3️⃣ Reject tokens revoked by logout
        let token_hash = hash_token(request.refresh_token());
        if self.token_repository.is_token_blacklisted(&token_hash).await? {
            warn!(user_id = %claims.sub, "Refresh attempted with revoked token");
            return Err(RefreshTokenError::TokenRevoked);
        }

        // 4️⃣ Issue a new access token for the same subject
        let access_token = self
            .token_provider
            .generate_access_token(&claims.subject())
            .map_err(|e| RefreshTokenError::TokenGenerationFailed(e.to_string()))?;

        Ok(RefreshTokenResponse { access_token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::Role;
    use crate::auth::application::ports::outgoing::TokenSubject;
    use crate::tests::support::auth_helper::jwt_service;
    use crate::tests::support::fakes::InMemoryTokenRepository;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn subject() -> TokenSubject {
        TokenSubject {
            user_id: Uuid::new_v4(),
            username: "alice".to_string(),
            role: Role::Client,
        }
    }

    fn use_case(repo: InMemoryTokenRepository) -> RefreshTokenUseCase<InMemoryTokenRepository> {
        RefreshTokenUseCase::new(repo, Arc::new(jwt_service()))
    }

    #[test]
    fn test_refresh_token_request_trimmed() {
        let request = RefreshTokenRequest::new("  token_123  ".to_string()).unwrap();
        assert_eq!(request.refresh_token(), "token_123");
    }

    #[test]
    fn test_refresh_token_request_deserialize_empty() {
        let result: Result<RefreshTokenRequest, _> =
            serde_json::from_value(json!({ "refresh_token": "   " }));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_refresh_issues_access_token_for_same_subject() {
        let subject = subject();
        let refresh = jwt_service().generate_refresh_token(&subject).unwrap();

        let response = use_case(InMemoryTokenRepository::default())
            .execute(RefreshTokenRequest::new(refresh).unwrap())
            .await
            .unwrap();

        let claims = jwt_service().verify_token(&response.access_token).unwrap();
        assert_eq!(claims.token_type, "access");
        assert_eq!(claims.subject(), subject);
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let access = jwt_service().generate_access_token(&subject()).unwrap();

        let result = use_case(InMemoryTokenRepository::default())
            .execute(RefreshTokenRequest::new(access).unwrap())
            .await;

        assert!(matches!(result, Err(RefreshTokenError::InvalidTokenType)));
    }

    #[tokio::test]
    async fn test_refresh_rejects_blacklisted_token() {
        let subject = subject();
        let refresh = jwt_service().generate_refresh_token(&subject).unwrap();
        let repo = InMemoryTokenRepository::default();
        repo.blacklist_token(hash_token(&refresh), subject.user_id, Utc::now())
            .await
            .unwrap();

        let result = use_case(repo)
            .execute(RefreshTokenRequest::new(refresh).unwrap())
            .await;

        assert!(matches!(result, Err(RefreshTokenError::TokenRevoked)));
    }

    #[tokio::test]
    async fn test_refresh_rejects_garbage() {
        let result = use_case(InMemoryTokenRepository::default())
            .execute(RefreshTokenRequest::new("not.a.token".into()).unwrap())
            .await;

        assert!(matches!(result, Err(RefreshTokenError::TokenInvalid)));
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Errors that can occur in token repository operations
#[derive(Debug, Clone)]
pub enum TokenRepositoryError {
    DatabaseError(String),
    InvalidToken,
}

impl std::fmt::Display for TokenRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            TokenRepositoryError::InvalidToken => write!(f, "Invalid token"),
        }
    }
}

impl std::error::Error for TokenRepositoryError {}

/// Revoked refresh tokens, keyed by token hash.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Add a token to the blacklist until it would have expired anyway.
    async fn blacklist_token(
        &self,
        token_hash: String,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenRepositoryError>;

    /// Check if a token is blacklisted
    async fn is_token_blacklisted(&self, token_hash: &str) -> Result<bool, TokenRepositoryError>;
}

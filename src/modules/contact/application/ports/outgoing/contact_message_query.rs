use async_trait::async_trait;

use crate::contact::application::domain::entities::ContactMessage;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactMessageQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ContactMessageQuery: Send + Sync {
    /// Newest first.
    async fn list(&self) -> Result<Vec<ContactMessage>, ContactMessageQueryError>;
}

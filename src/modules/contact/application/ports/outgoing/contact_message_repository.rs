use async_trait::async_trait;
use uuid::Uuid;

use crate::contact::application::domain::entities::{ContactMessage, ContactSubmission};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactMessageRepositoryError {
    #[error("Message not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ContactMessageRepository: Send + Sync {
    /// Stores the message unread.
    async fn create(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactMessage, ContactMessageRepositoryError>;

    async fn mark_read(&self, id: Uuid) -> Result<ContactMessage, ContactMessageRepositoryError>;
}

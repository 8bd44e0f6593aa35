use async_trait::async_trait;
use uuid::Uuid;

use crate::contact::application::domain::entities::ContactMessage;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkContactMessageReadError {
    #[error("Message not found")]
    NotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait MarkContactMessageReadUseCase: Send + Sync {
    async fn execute(&self, id: Uuid) -> Result<ContactMessage, MarkContactMessageReadError>;
}

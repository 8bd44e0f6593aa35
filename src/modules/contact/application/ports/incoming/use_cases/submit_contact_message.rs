use async_trait::async_trait;

use crate::contact::application::domain::entities::{ContactMessage, ContactSubmission};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitContactMessageError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait SubmitContactMessageUseCase: Send + Sync {
    async fn execute(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactMessage, SubmitContactMessageError>;
}

use async_trait::async_trait;
use tracing::info;

use crate::contact::application::domain::entities::{ContactMessage, ContactSubmission};
use crate::contact::application::ports::incoming::use_cases::{
    SubmitContactMessageError, SubmitContactMessageUseCase,
};
use crate::contact::application::ports::outgoing::ContactMessageRepository;

pub struct SubmitContactMessageService<R>
where
    R: ContactMessageRepository,
{
    repository: R,
}

impl<R> SubmitContactMessageService<R>
where
    R: ContactMessageRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> SubmitContactMessageUseCase for SubmitContactMessageService<R>
where
    R: ContactMessageRepository + Send + Sync,
{
    async fn execute(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactMessage, SubmitContactMessageError> {
        let stored = self
            .repository
            .create(submission)
            .await
            .map_err(|e| SubmitContactMessageError::RepositoryError(e.to_string()))?;

        info!(message_id = %stored.id, subject = %stored.subject, "Contact message received");
        Ok(stored)
    }
}

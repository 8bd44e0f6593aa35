use async_trait::async_trait;
use uuid::Uuid;

use crate::contact::application::domain::entities::ContactMessage;
use crate::contact::application::ports::incoming::use_cases::{
    MarkContactMessageReadError, MarkContactMessageReadUseCase,
};
use crate::contact::application::ports::outgoing::{
    ContactMessageRepository, ContactMessageRepositoryError,
};

pub struct MarkContactMessageReadService<R>
where
    R: ContactMessageRepository,
{
    repository: R,
}

impl<R> MarkContactMessageReadService<R>
where
    R: ContactMessageRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> MarkContactMessageReadUseCase for MarkContactMessageReadService<R>
where
    R: ContactMessageRepository + Send + Sync,
{
    async fn execute(&self, id: Uuid) -> Result<ContactMessage, MarkContactMessageReadError> {
        self.repository.mark_read(id).await.map_err(|e| match e {
            ContactMessageRepositoryError::NotFound => MarkContactMessageReadError::NotFound,
            other => MarkContactMessageReadError::RepositoryError(other.to_string()),
        })
    }
}

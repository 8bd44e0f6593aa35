use async_trait::async_trait;

use crate::contact::application::domain::entities::ContactMessage;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListContactMessagesError {
    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait ListContactMessagesUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<ContactMessage>, ListContactMessagesError>;
}

use async_trait::async_trait;

use crate::contact::application::domain::entities::ContactMessage;
use crate::contact::application::ports::incoming::use_cases::{
    ListContactMessagesError, ListContactMessagesUseCase,
};
use crate::contact::application::ports::outgoing::ContactMessageQuery;

pub struct ListContactMessagesService<Q>
where
    Q: ContactMessageQuery,
{
    query: Q,
}

impl<Q> ListContactMessagesService<Q>
where
    Q: ContactMessageQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> ListContactMessagesUseCase for ListContactMessagesService<Q>
where
    Q: ContactMessageQuery + Send + Sync,
{
    async fn execute(&self) -> Result<Vec<ContactMessage>, ListContactMessagesError> {
        self.query
            .list()
            .await
            .map_err(|e| ListContactMessagesError::QueryError(e.to_string()))
    }
}

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::contact::adapter::outgoing::sea_orm_entity::contact_messages::{
    self, ActiveModel, Column, Entity,
};
use crate::contact::application::domain::entities::{ContactMessage, ContactSubmission};
use crate::contact::application::ports::outgoing::{
    ContactMessageQuery, ContactMessageQueryError, ContactMessageRepository,
    ContactMessageRepositoryError,
};

/// Inbox storage. Serves both the write and the read port.
#[derive(Clone)]
pub struct ContactMessagePostgres {
    db: Arc<DatabaseConnection>,
}

impl ContactMessagePostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn to_domain(model: contact_messages::Model) -> ContactMessage {
    ContactMessage {
        id: model.id,
        name: model.name,
        email: model.email,
        subject: model.subject,
        message: model.message,
        read: model.read,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn map_db_err(e: DbErr) -> ContactMessageRepositoryError {
    ContactMessageRepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl ContactMessageRepository for ContactMessagePostgres {
    async fn create(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactMessage, ContactMessageRepositoryError> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(submission.name().to_string()),
            email: Set(submission.email().to_string()),
            subject: Set(submission.subject().to_string()),
            message: Set(submission.message().to_string()),
            read: Set(false),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let inserted = model.insert(&*self.db).await.map_err(map_db_err)?;
        Ok(to_domain(inserted))
    }

    async fn mark_read(&self, id: Uuid) -> Result<ContactMessage, ContactMessageRepositoryError> {
        let updated = Entity::update_many()
            .set(ActiveModel {
                read: Set(true),
                ..Default::default()
            })
            .filter(Column::Id.eq(id))
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?;

        updated
            .into_iter()
            .next()
            .map(to_domain)
            .ok_or(ContactMessageRepositoryError::NotFound)
    }
}

#[async_trait]
impl ContactMessageQuery for ContactMessagePostgres {
    async fn list(&self) -> Result<Vec<ContactMessage>, ContactMessageQueryError> {
        let models = Entity::find()
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(|e| ContactMessageQueryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(to_domain).collect())
    }
}

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use std::sync::Arc;

use crate::review::adapter::outgoing::sea_orm_entity::reviews::{self, Column, Entity};
use crate::review::application::domain::entities::Review;
use crate::review::application::ports::outgoing::{ReviewQuery, ReviewQueryError};

#[derive(Clone)]
pub struct ReviewQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ReviewQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewQuery for ReviewQueryPostgres {
    async fn list(&self) -> Result<Vec<Review>, ReviewQueryError> {
        let models = Entity::find()
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(|e| ReviewQueryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }
}

pub(super) fn model_to_domain(model: reviews::Model) -> Review {
    Review {
        id: model.id,
        request_id: model.request_id,
        username: model.username,
        project_name: model.project_name,
        service_type: model.service_type,
        // Column is constrained to 1-5 at insert
        rating: model.rating.clamp(0, i16::from(u8::MAX)) as u8,
        title: model.title,
        review: model.review,
        avatar: model.avatar,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

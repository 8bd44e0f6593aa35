use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};
use std::sync::Arc;
use uuid::Uuid;

use super::review_query_postgres::model_to_domain;
use crate::review::adapter::outgoing::sea_orm_entity::reviews::{
    ActiveModel, Column, Entity as ReviewEntity,
};
use crate::review::application::domain::entities::{NewReview, Review};
use crate::review::application::ports::outgoing::{ReviewRepository, ReviewRepositoryError};

#[derive(Clone)]
pub struct ReviewRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ReviewRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_db_err(e: DbErr) -> ReviewRepositoryError {
    let message = e.to_string();
    let lower = message.to_lowercase();
    if lower.contains("23505") || lower.contains("duplicate key") {
        ReviewRepositoryError::Duplicate
    } else {
        ReviewRepositoryError::DatabaseError(message)
    }
}

fn new_row(review: NewReview) -> ActiveModel {
    ActiveModel {
        id: Set(Uuid::new_v4()),
        request_id: Set(review.request_id),
        username: Set(review.username),
        project_name: Set(review.project_name),
        service_type: Set(review.service_type),
        rating: Set(i16::from(review.rating)),
        title: Set(review.title),
        review: Set(review.review),
        avatar: Set(review.avatar),
        created_at: Set(Utc::now().fixed_offset()),
    }
}

#[async_trait]
impl ReviewRepository for ReviewRepositoryPostgres {
    async fn create(&self, review: NewReview) -> Result<Review, ReviewRepositoryError> {
        let inserted = new_row(review).insert(&*self.db).await.map_err(map_db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn upsert_for_request(&self, review: NewReview) -> Result<Review, ReviewRepositoryError> {
        let stored = ReviewEntity::insert(new_row(review))
            .on_conflict(
                OnConflict::column(Column::RequestId)
                    .update_columns([Column::Rating, Column::Title, Column::Review])
                    .to_owned(),
            )
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model_to_domain(stored))
    }
}

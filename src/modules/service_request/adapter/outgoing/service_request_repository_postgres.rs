use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::service_request_query_postgres::model_to_domain;
use crate::service_request::adapter::outgoing::sea_orm_entity::service_requests::{
    self, ActiveModel, Column, Entity,
};
use crate::service_request::application::domain::entities::{RequestStatus, ServiceRequest};
use crate::service_request::application::ports::outgoing::{
    NewServiceRequest, ServiceRequestChanges, ServiceRequestRepository,
    ServiceRequestRepositoryError,
};
use crate::shared::api::PatchField;

// ============================================================================
// Repository Implementation
// ============================================================================

#[derive(Clone)]
pub struct ServiceRequestRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ServiceRequestRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ServiceRequestRepository for ServiceRequestRepositoryPostgres {
    async fn create(
        &self,
        data: NewServiceRequest,
    ) -> Result<ServiceRequest, ServiceRequestRepositoryError> {
        let now = Utc::now().fixed_offset();
        let draft = data.draft;

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(data.username),
            project_name: Set(draft.project_name),
            service_type: Set(draft.service_type),
            description: Set(draft.description),
            timeline: Set(draft.timeline),
            budget: Set(draft.budget),
            additional_notes: Set(draft.additional_notes),
            reference_links: Set(to_json(&draft.reference_links)?),
            status: Set(RequestStatus::Pending.as_str().to_string()),
            progress: Set(None),
            invoice_url: Set(None),
            invoice_urls: Set(to_json(&Vec::<String>::new())?),
            invoice_id: Set(None),
            paid: Set(false),
            paid_at: Set(None),
            payment_details: Set(None),
            reviewed: Set(false),
            review: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&*self.db).await.map_err(map_db_err)?;
        to_domain(inserted)
    }

    async fn update(
        &self,
        id: Uuid,
        expected_status: Option<RequestStatus>,
        changes: ServiceRequestChanges,
    ) -> Result<ServiceRequest, ServiceRequestRepositoryError> {
        let mut model = <ActiveModel as Default>::default();

        if let Some(status) = changes.status {
            model.status = Set(status.as_str().to_string());
        }

        match changes.progress {
            PatchField::Unset => {}
            PatchField::Null => model.progress = Set(None),
            PatchField::Value(p) => model.progress = Set(Some(i16::from(p))),
        }

        match changes.invoice_url {
            PatchField::Unset => {}
            PatchField::Null => model.invoice_url = Set(None),
            PatchField::Value(url) => model.invoice_url = Set(Some(url)),
        }

        if let Some(urls) = changes.invoice_urls {
            model.invoice_urls = Set(to_json(&urls)?);
        }

        if let Some(invoice_id) = changes.invoice_id {
            model.invoice_id = Set(Some(invoice_id));
        }

        if let Some(reviewed) = changes.reviewed {
            model.reviewed = Set(reviewed);
        }

        if let Some(review) = changes.review {
            model.review = Set(Some(to_json(&review)?));
        }

        if let Some(paid_at) = changes.paid_at {
            model.paid = Set(true);
            model.paid_at = Set(Some(paid_at.fixed_offset()));
        }

        if let Some(details) = changes.payment_details {
            model.payment_details = Set(Some(details));
        }

        model.updated_at = Set(Utc::now().fixed_offset());

        let mut update = Entity::update_many().set(model).filter(Column::Id.eq(id));
        if let Some(expected) = expected_status {
            update = update.filter(Column::Status.eq(expected.as_str()));
        }

        let updated = update
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .next();

        match updated {
            Some(model) => to_domain(model),
            None if expected_status.is_some() => {
                // Zero rows: either gone or its status moved on.
                let exists = Entity::find_by_id(id)
                    .one(&*self.db)
                    .await
                    .map_err(map_db_err)?
                    .is_some();
                if exists {
                    Err(ServiceRequestRepositoryError::StatusConflict)
                } else {
                    Err(ServiceRequestRepositoryError::NotFound)
                }
            }
            None => Err(ServiceRequestRepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceRequestRepositoryError> {
        let result = Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(ServiceRequestRepositoryError::NotFound);
        }
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn to_domain(model: service_requests::Model) -> Result<ServiceRequest, ServiceRequestRepositoryError> {
    model_to_domain(model).map_err(ServiceRequestRepositoryError::SerializationError)
}

fn to_json<T: serde::Serialize>(
    data: &T,
) -> Result<serde_json::Value, ServiceRequestRepositoryError> {
    serde_json::to_value(data)
        .map_err(|e| ServiceRequestRepositoryError::SerializationError(e.to_string()))
}

fn map_db_err(e: DbErr) -> ServiceRequestRepositoryError {
    ServiceRequestRepositoryError::DatabaseError(e.to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service_request::adapter::outgoing::service_request_query_postgres::tests::model;
    use crate::service_request::application::domain::entities::ServiceRequestDraft;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn test_create_returns_pending_request() {
        let stored = model("alice", "Pending");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![stored.clone()]])
            .into_connection();

        let created = ServiceRequestRepositoryPostgres::new(Arc::new(db))
            .create(NewServiceRequest {
                username: "alice".into(),
                draft: ServiceRequestDraft {
                    project_name: "Site".into(),
                    service_type: "web-design".into(),
                    description: "A landing page".into(),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(created.id, stored.id);
        assert_eq!(created.status, RequestStatus::Pending);
    }

    #[tokio::test]
    async fn test_update_returns_updated_row() {
        let mut row = model("alice", "Completed");
        row.progress = Some(100);
        let id = row.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row]])
            .into_connection();

        let updated = ServiceRequestRepositoryPostgres::new(Arc::new(db))
            .update(
                id,
                Some(RequestStatus::Accepted),
                ServiceRequestChanges {
                    status: Some(RequestStatus::Completed),
                    progress: PatchField::Value(100),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, RequestStatus::Completed);
        assert_eq!(updated.progress, Some(100));
    }

    #[tokio::test]
    async fn test_conditional_update_reports_conflict_when_row_exists() {
        let existing = model("alice", "Declined");
        let id = existing.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<service_requests::Model>::new()])
            .append_query_results(vec![vec![existing]])
            .into_connection();

        let result = ServiceRequestRepositoryPostgres::new(Arc::new(db))
            .update(
                id,
                Some(RequestStatus::Pending),
                ServiceRequestChanges {
                    status: Some(RequestStatus::Accepted),
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(result, Err(ServiceRequestRepositoryError::StatusConflict));
    }

    #[tokio::test]
    async fn test_conditional_update_missing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<service_requests::Model>::new()])
            .append_query_results(vec![Vec::<service_requests::Model>::new()])
            .into_connection();

        let result = ServiceRequestRepositoryPostgres::new(Arc::new(db))
            .update(
                Uuid::new_v4(),
                Some(RequestStatus::Pending),
                ServiceRequestChanges {
                    status: Some(RequestStatus::Accepted),
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(result, Err(ServiceRequestRepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(1), exec(0)])
            .into_connection();
        let repo = ServiceRequestRepositoryPostgres::new(Arc::new(db));

        assert_eq!(repo.delete(Uuid::new_v4()).await, Ok(()));
        assert_eq!(
            repo.delete(Uuid::new_v4()).await,
            Err(ServiceRequestRepositoryError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_delete_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors(vec![DbErr::Custom("connection lost".into())])
            .into_connection();

        let result = ServiceRequestRepositoryPostgres::new(Arc::new(db))
            .delete(Uuid::new_v4())
            .await;

        assert!(matches!(
            result,
            Err(ServiceRequestRepositoryError::DatabaseError(_))
        ));
    }
}

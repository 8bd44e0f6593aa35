use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use uuid::Uuid;

use crate::service_request::adapter::outgoing::sea_orm_entity::service_requests::{
    self, Column, Entity,
};
use crate::service_request::application::domain::entities::{
    RequestReview, RequestStatus, ServiceRequest,
};
use crate::service_request::application::ports::outgoing::{
    ServiceRequestFilter, ServiceRequestQuery, ServiceRequestQueryError,
};

#[derive(Clone)]
pub struct ServiceRequestQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ServiceRequestQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ServiceRequestQuery for ServiceRequestQueryPostgres {
    async fn find_by_id(&self, id: Uuid) -> Result<ServiceRequest, ServiceRequestQueryError> {
        let model = Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(ServiceRequestQueryError::NotFound)?;

        model_to_domain(model).map_err(ServiceRequestQueryError::SerializationError)
    }

    async fn find_by_invoice_id(
        &self,
        invoice_id: &str,
    ) -> Result<ServiceRequest, ServiceRequestQueryError> {
        let model = Entity::find()
            .filter(Column::InvoiceId.eq(invoice_id))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(ServiceRequestQueryError::NotFound)?;

        model_to_domain(model).map_err(ServiceRequestQueryError::SerializationError)
    }

    async fn list(
        &self,
        filter: ServiceRequestFilter,
    ) -> Result<Vec<ServiceRequest>, ServiceRequestQueryError> {
        let mut query = Entity::find();

        if let Some(username) = filter.username {
            query = query.filter(Column::Username.eq(username));
        }

        let models = query
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        models
            .into_iter()
            .map(|m| model_to_domain(m).map_err(ServiceRequestQueryError::SerializationError))
            .collect()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Shared with the repository adapter. Errors are serialization messages.
pub(super) fn model_to_domain(model: service_requests::Model) -> Result<ServiceRequest, String> {
    let status: RequestStatus = model.status.parse().map_err(|e| format!("{e}"))?;

    let reference_links: Vec<String> =
        serde_json::from_value(model.reference_links).map_err(|e| e.to_string())?;
    let invoice_urls: Vec<String> =
        serde_json::from_value(model.invoice_urls).map_err(|e| e.to_string())?;
    let review: Option<RequestReview> = model
        .review
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| e.to_string())?;

    let progress = model
        .progress
        .map(|p| u8::try_from(p).map_err(|_| format!("progress out of range: {p}")))
        .transpose()?;

    Ok(ServiceRequest {
        id: model.id,
        username: model.username,
        project_name: model.project_name,
        service_type: model.service_type,
        description: model.description,
        timeline: model.timeline,
        budget: model.budget,
        additional_notes: model.additional_notes,
        reference_links,
        status,
        progress,
        invoice_url: model.invoice_url,
        invoice_urls,
        invoice_id: model.invoice_id,
        paid: model.paid,
        paid_at: model.paid_at.map(Into::into),
        payment_details: model.payment_details,
        reviewed: model.reviewed,
        review,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    })
}

fn map_db_err(e: DbErr) -> ServiceRequestQueryError {
    ServiceRequestQueryError::DatabaseError(e.to_string())
}

use async_trait::async_trait;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::review::application::domain::entities::NewReview;
use crate::review::application::ports::outgoing::ReviewRepository;

use crate::service_request::application::domain::entities::{
    is_http_url, Actor, RequestReview, RequestStatus, ServiceRequest,
};
use crate::service_request::application::ports::incoming::use_cases::{
    PatchServiceRequestError, PatchServiceRequestUseCase, ServiceRequestPatch,
};
use crate::service_request::application::ports::outgoing::{
    ServiceRequestChanges, ServiceRequestQuery, ServiceRequestQueryError,
    ServiceRequestRepository, ServiceRequestRepositoryError,
};
use crate::shared::api::PatchField;

/// Reviews written here are mirrored into the public review store, so the
/// embedded copy and `GET /api/reviews` never disagree.
pub struct PatchServiceRequestService<Q, R, V>
where
    Q: ServiceRequestQuery,
    R: ServiceRequestRepository,
    V: ReviewRepository,
{
    query: Q,
    repository: R,
    reviews: V,
}

impl<Q, R, V> PatchServiceRequestService<Q, R, V>
where
    Q: ServiceRequestQuery,
    R: ServiceRequestRepository,
    V: ReviewRepository,
{
    pub fn new(query: Q, repository: R, reviews: V) -> Self {
        Self {
            query,
            repository,
            reviews,
        }
    }
}

fn checked_url(url: String) -> Result<String, PatchServiceRequestError> {
    let url = url.trim().to_string();
    if is_http_url(&url) {
        Ok(url)
    } else {
        Err(PatchServiceRequestError::InvalidUrl(url))
    }
}

/// Turns an allow-listed patch into column changes against `current`.
fn plan_changes(
    current: &ServiceRequest,
    patch: ServiceRequestPatch,
) -> Result<ServiceRequestChanges, PatchServiceRequestError> {
    let mut changes = ServiceRequestChanges::default();
    let mut next_status = current.status;

    if let Some(target) = patch.status {
        if target != current.status {
            if !current.status.can_transition_to(target) {
                return Err(PatchServiceRequestError::InvalidTransition {
                    from: current.status,
                    to: target,
                });
            }
            changes.status = Some(target);
            next_status = target;

            match target {
                RequestStatus::Completed => changes.progress = PatchField::Value(100),
                RequestStatus::Declined => changes.progress = PatchField::Null,
                _ => {}
            }
        }
    }

    match patch.progress {
        PatchField::Unset => {}
        PatchField::Null => {
            if next_status == RequestStatus::Completed {
                return Err(PatchServiceRequestError::ProgressNotAllowed);
            }
            changes.progress = PatchField::Null;
        }
        PatchField::Value(p) => {
            if !(0..=100).contains(&p) {
                return Err(PatchServiceRequestError::InvalidProgress);
            }
            let allowed = next_status == RequestStatus::Accepted
                || (next_status == RequestStatus::Completed && p == 100);
            if !allowed {
                return Err(PatchServiceRequestError::ProgressNotAllowed);
            }
            changes.progress = PatchField::Value(p as u8);
        }
    }

    changes.invoice_url = match patch.invoice_url {
        PatchField::Unset => PatchField::Unset,
        PatchField::Null => PatchField::Null,
        PatchField::Value(url) => PatchField::Value(checked_url(url)?),
    };

    if let Some(urls) = patch.invoice_urls {
        let urls = urls
            .into_iter()
            .map(checked_url)
            .collect::<Result<Vec<_>, _>>()?;
        changes.invoice_urls = Some(urls);
    }

    changes.reviewed = patch.reviewed;
    if let Some(input) = patch.review {
        if next_status != RequestStatus::Completed {
            return Err(PatchServiceRequestError::RequestNotCompleted);
        }
        changes.review = Some(RequestReview::try_from(input)?);
        changes.reviewed = Some(true);
    }

    Ok(changes)
}

#[async_trait]
impl<Q, R, V> PatchServiceRequestUseCase for PatchServiceRequestService<Q, R, V>
where
    Q: ServiceRequestQuery + Send + Sync,
    R: ServiceRequestRepository + Send + Sync,
    V: ReviewRepository + Send + Sync,
{
    async fn execute(
        &self,
        actor: Actor,
        id: Uuid,
        patch: ServiceRequestPatch,
    ) -> Result<ServiceRequest, PatchServiceRequestError> {
        if patch.is_empty() {
            return Err(PatchServiceRequestError::EmptyPatch);
        }

        let current = self.query.find_by_id(id).await.map_err(|e| match e {
            ServiceRequestQueryError::NotFound => PatchServiceRequestError::NotFound,
            other => PatchServiceRequestError::RepositoryError(other.to_string()),
        })?;

        if !actor.can_access(&current) {
            return Err(PatchServiceRequestError::NotFound);
        }

        if !actor.is_admin() {
            if let Some(field) = patch.admin_only_field() {
                warn!(request_id = %id, username = %actor.username, field, "Client tried an admin-only field");
                return Err(PatchServiceRequestError::ForbiddenField(field));
            }
            if current.status != RequestStatus::Completed {
                return Err(PatchServiceRequestError::RequestNotCompleted);
            }
        }

        let changes = plan_changes(&current, patch)?;
        if changes.is_empty() {
            return Ok(current);
        }

        let review = changes.review.clone();

        // Every planned change was validated against the status read above
        let updated = self
            .repository
            .update(id, Some(current.status), changes)
            .await
            .map_err(|e| match e {
                ServiceRequestRepositoryError::NotFound => PatchServiceRequestError::NotFound,
                ServiceRequestRepositoryError::StatusConflict => PatchServiceRequestError::Modified,
                other => PatchServiceRequestError::RepositoryError(other.to_string()),
            })?;

        if let Some(review) = review {
            self.reviews
                .upsert_for_request(NewReview::for_request(&updated, &review, None))
                .await
                .map_err(|e| {
                    error!(request_id = %id, error = %e, "Request review saved but not published");
                    PatchServiceRequestError::RepositoryError(e.to_string())
                })?;
        }

        if updated.status != current.status {
            info!(
                request_id = %id,
                from = %current.status,
                to = %updated.status,
                "Service request status changed"
            );
        }

        Ok(updated)
    }
}

use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::service_request::application::domain::entities::Actor;
use crate::service_request::application::ports::incoming::use_cases::DeleteServiceRequestError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{delete, web, Responder};
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedServiceRequest {
    pub id: Uuid,
}

/// Delete (or withdraw) a service request
///
/// The admin may delete any request. A client may withdraw their own request
/// while it is still `Pending`.
#[utoipa::path(
    delete,
    path = "/api/service-requests/{id}",
    tag = "service-requests",
    params(("id" = Uuid, Path, description = "Service request id")),
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Deleted", body = inline(crate::api::schemas::SuccessResponse<DeletedServiceRequest>)),
        (status = 404, description = "Unknown id, or owned by someone else", body = ErrorResponse),
        (
            status = 409,
            description = "Client tried to withdraw a request that is no longer pending",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "REQUEST_NOT_PENDING", "message": "Only pending requests can be withdrawn" }
            })
        ),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[delete("/api/service-requests/{id}")]
pub async fn delete_service_request_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();

    match data
        .service_request
        .delete
        .execute(Actor::from(&user), id)
        .await
    {
        Ok(id) => {
            info!(request_id = %id, by = %user.username, "Service request deleted");
            ApiResponse::success(DeletedServiceRequest { id })
        }
        Err(DeleteServiceRequestError::NotFound) => {
            ApiResponse::not_found("SERVICE_REQUEST_NOT_FOUND", "Service request not found")
        }
        Err(e @ DeleteServiceRequestError::NotPending) => {
            ApiResponse::conflict("REQUEST_NOT_PENDING", &e.to_string())
        }
        Err(DeleteServiceRequestError::RepositoryError(e)) => {
            error!(request_id = %id, error = %e, "Failed to delete service request");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service_request::application::domain::entities::RequestStatus;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{admin_token, bearer, client_token, jwt_data};
    use crate::tests::support::fakes::InMemoryServiceRequests;
    use crate::tests::support::fixtures::sample_request;
    use actix_web::{test, App};
    use serde_json::Value;

    async fn call(store: &InMemoryServiceRequests, token: &str, id: Uuid) -> (u16, Value) {
        let state = TestAppStateBuilder::default()
            .with_service_request_store(store.clone())
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(jwt_data())
                .service(delete_service_request_handler),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/service-requests/{id}"))
            .insert_header(bearer(token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_client_withdraws_pending_request() {
        let store = InMemoryServiceRequests::default();
        let request = store.seed(sample_request("alice", RequestStatus::Pending, 0));

        let (status, body) = call(&store, &client_token("alice"), request.id).await;

        assert_eq!(status, 200);
        assert_eq!(body["data"]["id"], request.id.to_string());
        assert!(store.get(request.id).is_none());
    }

    #[actix_web::test]
    async fn test_client_cannot_withdraw_accepted_request() {
        let store = InMemoryServiceRequests::default();
        let request = store.seed(sample_request("alice", RequestStatus::Accepted, 0));

        let (status, body) = call(&store, &client_token("alice"), request.id).await;

        assert_eq!(status, 409);
        assert_eq!(body["error"]["code"], "REQUEST_NOT_PENDING");
        assert!(store.get(request.id).is_some());
    }

    #[actix_web::test]
    async fn test_admin_deletes_any_status() {
        let store = InMemoryServiceRequests::default();
        let request = store.seed(sample_request("alice", RequestStatus::Completed, 0));

        let (status, _) = call(&store, &admin_token(), request.id).await;

        assert_eq!(status, 200);
        assert_eq!(store.len(), 0);
    }

    #[actix_web::test]
    async fn test_missing_request_is_404() {
        let (status, _) = call(
            &InMemoryServiceRequests::default(),
            &admin_token(),
            Uuid::new_v4(),
        )
        .await;
        assert_eq!(status, 404);
    }
}

use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::service_request::application::domain::entities::Actor;
use crate::service_request::application::ports::incoming::use_cases::ListServiceRequestsError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};
use serde::Deserialize;
use tracing::{debug, error};
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListServiceRequestsQuery {
    /// Exact username filter, honoured for the admin only
    pub username: Option<String>,
}

/// List service requests
///
/// The admin sees every request (optionally filtered by username); a client
/// always receives their own requests. Newest first.
#[utoipa::path(
    get,
    path = "/api/service-requests",
    tag = "service-requests",
    params(ListServiceRequestsQuery),
    security(("BearerAuth" = [])),
    responses(
        (
            status = 200,
            description = "Requests visible to the caller",
            body = inline(crate::api::schemas::SuccessResponse<Vec<crate::service_request::application::domain::entities::ServiceRequest>>)
        ),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/service-requests")]
pub async fn list_service_requests_handler(
    user: AuthenticatedUser,
    query: web::Query<ListServiceRequestsQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let username = query.into_inner().username;
    debug!(caller = %user.username, filter = ?username, "Listing service requests");

    match data
        .service_request
        .list
        .execute(Actor::from(&user), username)
        .await
    {
        Ok(requests) => ApiResponse::success(requests),
        Err(ListServiceRequestsError::QueryError(e)) => {
            error!(error = %e, "Failed to list service requests");
            ApiResponse::internal_error()
        }
    }
}

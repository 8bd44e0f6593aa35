use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::review::application::ports::incoming::use_cases::{
    CreateReviewError, CreateReviewInput,
};
use crate::service_request::application::domain::entities::Actor;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewDto {
    pub request_id: Uuid,
    #[schema(example = 5, minimum = 1, maximum = 5)]
    pub rating: i64,
    #[schema(example = "Great work")]
    pub title: String,
    #[schema(example = "Delivered on time and the site looks fantastic.")]
    pub review: String,
    pub avatar: Option<String>,
}

/// Review a completed request
///
/// Publishes a testimonial and marks the request as reviewed. Each request
/// can be reviewed once, by its owner.
#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = "reviews",
    request_body = CreateReviewDto,
    security(("BearerAuth" = [])),
    responses(
        (
            status = 201,
            description = "Review published",
            body = inline(crate::api::schemas::SuccessResponse<crate::review::application::domain::entities::Review>)
        ),
        (status = 400, description = "Invalid rating, title, text or avatar", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Unknown request, or owned by someone else", body = ErrorResponse),
        (
            status = 409,
            description = "Request not completed, or already reviewed",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "ALREADY_REVIEWED", "message": "This request has already been reviewed" }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/reviews")]
pub async fn create_review_handler(
    user: AuthenticatedUser,
    req: web::Json<CreateReviewDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();
    let request_id = dto.request_id;
    let input = CreateReviewInput {
        request_id,
        rating: dto.rating,
        title: dto.title,
        review: dto.review,
        avatar: dto.avatar,
    };

    match data.review.create.execute(Actor::from(&user), input).await {
        Ok(review) => ApiResponse::created(review),

        Err(e @ (CreateReviewError::Invalid(_) | CreateReviewError::InvalidAvatar)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string())
        }
        Err(CreateReviewError::RequestNotFound) => {
            ApiResponse::not_found("SERVICE_REQUEST_NOT_FOUND", "Service request not found")
        }
        Err(e @ CreateReviewError::RequestNotCompleted) => {
            ApiResponse::conflict("REQUEST_NOT_COMPLETED", &e.to_string())
        }
        Err(e @ CreateReviewError::AlreadyReviewed) => {
            warn!(%request_id, username = %user.username, "Duplicate review attempt");
            ApiResponse::conflict("ALREADY_REVIEWED", &e.to_string())
        }
        Err(CreateReviewError::RepositoryError(e)) => {
            error!(%request_id, error = %e, "Failed to store review");
            ApiResponse::internal_error()
        }
    }
}

use crate::api::schemas::ErrorResponse;
use crate::review::application::ports::incoming::use_cases::ListReviewsError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};
use tracing::error;

/// Public testimonials, newest first
#[utoipa::path(
    get,
    path = "/api/reviews",
    tag = "reviews",
    responses(
        (
            status = 200,
            description = "All reviews",
            body = inline(crate::api::schemas::SuccessResponse<Vec<crate::review::application::domain::entities::Review>>)
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/reviews")]
pub async fn list_reviews_handler(data: web::Data<AppState>) -> impl Responder {
    match data.review.list.execute().await {
        Ok(reviews) => ApiResponse::success(reviews),
        Err(ListReviewsError::QueryError(e)) => {
            error!(error = %e, "Failed to list reviews");
            ApiResponse::internal_error()
        }
    }
}

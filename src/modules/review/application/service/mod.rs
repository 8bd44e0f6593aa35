mod create_review_service;
mod list_reviews_service;

pub use create_review_service::CreateReviewService;
pub use list_reviews_service::ListReviewsService;

mod create_review;
mod list_reviews;

pub use create_review::{CreateReviewError, CreateReviewInput, CreateReviewUseCase};
pub use list_reviews::{ListReviewsError, ListReviewsUseCase};

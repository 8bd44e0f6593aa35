mod create_review;
mod list_reviews;

pub use create_review::{create_review_handler, CreateReviewDto};
pub use list_reviews::list_reviews_handler;

// Referenced by `paths(...)` in the OpenAPI document
pub use create_review::__path_create_review_handler;
pub use list_reviews::__path_list_reviews_handler;

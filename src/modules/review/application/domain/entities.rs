use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::service_request::application::domain::entities::{RequestReview, ServiceRequest};

/// Public testimonial left on a completed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub request_id: Uuid,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "Bakery website")]
    pub project_name: String,
    #[schema(example = "web-design")]
    pub service_type: String,
    #[schema(example = 5)]
    pub rating: u8,
    #[schema(example = "Great work")]
    pub title: String,
    #[schema(example = "Delivered on time and the site looks fantastic.")]
    pub review: String,
    pub avatar: Option<String>,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

/// Row to insert; display fields are copied from the reviewed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub request_id: Uuid,
    pub username: String,
    pub project_name: String,
    pub service_type: String,
    pub rating: u8,
    pub title: String,
    pub review: String,
    pub avatar: Option<String>,
}

impl NewReview {
    pub fn for_request(
        request: &ServiceRequest,
        review: &RequestReview,
        avatar: Option<String>,
    ) -> Self {
        Self {
            request_id: request.id,
            username: request.username.clone(),
            project_name: request.project_name.clone(),
            service_type: request.service_type.clone(),
            rating: review.rating,
            title: review.title.clone(),
            review: review.text.clone(),
            avatar,
        }
    }
}

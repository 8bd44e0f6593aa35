use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::auth::application::domain::entities::Role;
use crate::service_request::application::domain::entities::{
    Actor, RequestStatus, ServiceRequest,
};

pub fn client(username: &str) -> Actor {
    Actor::new(username, Role::Client)
}

pub fn admin() -> Actor {
    Actor::new(super::auth_helper::TEST_ADMIN_USERNAME, Role::Admin)
}

/// A request submitted by `username`, `age_minutes` ago.
pub fn sample_request(username: &str, status: RequestStatus, age_minutes: i64) -> ServiceRequest {
    let created = Utc::now() - Duration::minutes(age_minutes);
    ServiceRequest {
        id: Uuid::new_v4(),
        username: username.to_string(),
        project_name: "Site".to_string(),
        service_type: "web-design".to_string(),
        description: "A small landing page".to_string(),
        timeline: Some("2 weeks".to_string()),
        budget: None,
        additional_notes: None,
        reference_links: vec!["https://example.com".to_string()],
        progress: match status {
            RequestStatus::Completed => Some(100),
            _ => None,
        },
        status,
        invoice_url: None,
        invoice_urls: vec![],
        invoice_id: None,
        paid: false,
        paid_at: None,
        payment_details: None,
        reviewed: false,
        review: None,
        created_at: created,
        updated_at: created,
    }
}

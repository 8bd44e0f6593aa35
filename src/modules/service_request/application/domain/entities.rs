use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::application::domain::entities::Role;

pub const MAX_REFERENCE_LINKS: usize = 3;
pub const MIN_REVIEW_TEXT_LENGTH: usize = 10;

//
// ──────────────────────────────────────────────────────────
// Status lifecycle
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum RequestStatus {
    Pending,
    Accepted,
    Declined,
    Completed,
}

impl RequestStatus {
    /// Pending -> Accepted | Declined, Accepted -> Completed | Declined.
    /// Completed and Declined are terminal.
    pub fn can_transition_to(self, next: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, next),
            (Pending, Accepted) | (Pending, Declined) | (Accepted, Completed) | (Accepted, Declined)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Completed | RequestStatus::Declined)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Accepted => "Accepted",
            RequestStatus::Declined => "Declined",
            RequestStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown request status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for RequestStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(RequestStatus::Pending),
            "Accepted" => Ok(RequestStatus::Accepted),
            "Declined" => Ok(RequestStatus::Declined),
            "Completed" => Ok(RequestStatus::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Review embedded in a request
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RequestReview {
    #[schema(example = 5, minimum = 1, maximum = 5)]
    pub rating: u8,
    #[schema(example = "Great work")]
    pub title: String,
    #[schema(example = "Delivered on time and the site looks fantastic.")]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestReviewError {
    #[error("Rating must be between 1 and 5")]
    InvalidRating,

    #[error("Review title cannot be empty")]
    EmptyTitle,

    #[error("Review text must be at least {} characters", MIN_REVIEW_TEXT_LENGTH)]
    TextTooShort,
}

/// Unvalidated review as submitted by a client.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReviewInput {
    pub rating: i64,
    pub title: String,
    pub text: String,
}

impl RequestReview {
    pub fn new(rating: i64, title: &str, text: &str) -> Result<Self, RequestReviewError> {
        if !(1..=5).contains(&rating) {
            return Err(RequestReviewError::InvalidRating);
        }
        let title = title.trim();
        if title.is_empty() {
            return Err(RequestReviewError::EmptyTitle);
        }
        let text = text.trim();
        if text.chars().count() < MIN_REVIEW_TEXT_LENGTH {
            return Err(RequestReviewError::TextTooShort);
        }

        Ok(Self {
            rating: rating as u8,
            title: title.to_string(),
            text: text.to_string(),
        })
    }
}

impl TryFrom<ReviewInput> for RequestReview {
    type Error = RequestReviewError;

    fn try_from(input: ReviewInput) -> Result<Self, Self::Error> {
        RequestReview::new(input.rating, &input.title, &input.text)
    }
}

//
// ──────────────────────────────────────────────────────────
// Service request
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: Uuid,
    /// Submitter, taken from the access token at creation
    pub username: String,
    pub project_name: String,
    pub service_type: String,
    pub description: String,
    pub timeline: Option<String>,
    pub budget: Option<String>,
    pub additional_notes: Option<String>,
    pub reference_links: Vec<String>,
    pub status: RequestStatus,
    /// 0-100, only meaningful while Accepted
    pub progress: Option<u8>,
    pub invoice_url: Option<String>,
    pub invoice_urls: Vec<String>,
    pub invoice_id: Option<String>,
    pub paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    /// Provider payload of the paid event, stored as received
    #[schema(value_type = Option<Object>)]
    pub payment_details: Option<serde_json::Value>,
    pub reviewed: bool,
    pub review: Option<RequestReview>,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

impl ServiceRequest {
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.username == username
    }
}

/// Identity a use case acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub username: String,
    pub role: Role,
}

impl Actor {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Admins see every request, clients only their own.
    pub fn can_access(&self, request: &ServiceRequest) -> bool {
        self.is_admin() || request.is_owned_by(&self.username)
    }
}

/// `http://` or `https://` followed by a host, no whitespace.
pub fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));

    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !host.is_empty() && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

//
// ──────────────────────────────────────────────────────────
// Draft (client submission)
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceRequestDraft {
    pub project_name: String,
    pub service_type: String,
    pub description: String,
    pub timeline: Option<String>,
    pub budget: Option<String>,
    pub additional_notes: Option<String>,
    pub reference_links: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceRequestDraftError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("At most {} reference links are allowed", MAX_REFERENCE_LINKS)]
    TooManyLinks,

    #[error("Invalid reference link: {0}")]
    InvalidLink(String),
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ServiceRequestDraft {
    /// Trims every field, drops blank optionals and blank links.
    pub fn normalized(self) -> Result<Self, ServiceRequestDraftError> {
        let project_name = self.project_name.trim().to_string();
        if project_name.is_empty() {
            return Err(ServiceRequestDraftError::MissingField("projectName"));
        }
        let service_type = self.service_type.trim().to_string();
        if service_type.is_empty() {
            return Err(ServiceRequestDraftError::MissingField("serviceType"));
        }
        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(ServiceRequestDraftError::MissingField("description"));
        }

        let reference_links: Vec<String> = self
            .reference_links
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        if reference_links.len() > MAX_REFERENCE_LINKS {
            return Err(ServiceRequestDraftError::TooManyLinks);
        }
        if let Some(bad) = reference_links.iter().find(|l| !is_http_url(l)) {
            return Err(ServiceRequestDraftError::InvalidLink(bad.clone()));
        }

        Ok(Self {
            project_name,
            service_type,
            description,
            timeline: non_blank(self.timeline),
            budget: non_blank(self.budget),
            additional_notes: non_blank(self.additional_notes),
            reference_links,
        })
    }
}

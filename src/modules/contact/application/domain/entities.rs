use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "Project enquiry")]
    pub subject: String,
    pub message: String,
    pub read: bool,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

/// Validated visitor message, ready to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    name: String,
    email: String,
    subject: String,
    message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactSubmissionError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid email address")]
    InvalidEmail,
}

fn required(value: &str, field: &'static str) -> Result<String, ContactSubmissionError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ContactSubmissionError::MissingField(field));
    }
    Ok(value.to_string())
}

impl ContactSubmission {
    pub fn new(
        name: &str,
        email: &str,
        subject: &str,
        message: &str,
    ) -> Result<Self, ContactSubmissionError> {
        let name = required(name, "name")?;
        let email = required(email, "email")?;
        let subject = required(subject, "subject")?;
        let message = required(message, "message")?;

        if !EmailAddress::is_valid(&email) {
            return Err(ContactSubmissionError::InvalidEmail);
        }

        Ok(Self {
            name,
            email,
            subject,
            message,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

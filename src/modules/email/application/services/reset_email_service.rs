use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::email::application::ports::outgoing::{
    EmailSender, PasswordResetNotificationError, PasswordResetNotifier,
};

const RESET_SUBJECT: &str = "Your password reset code";

#[derive(Clone)]
pub struct ResetEmailService {
    sender: Arc<dyn EmailSender + Send + Sync>,
}

impl fmt::Debug for ResetEmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetEmailService")
            .field("sender", &"<dyn EmailSender>")
            .finish()
    }
}

impl ResetEmailService {
    pub fn new(sender: Arc<dyn EmailSender + Send + Sync>) -> Self {
        Self { sender }
    }

    fn render(username: &str, code: &str, valid_for_minutes: i64) -> String {
        format!(
            "<p>Hi {username},</p>\
             <p>Use the code below to set a new password:</p>\
             <p style=\"font-size:24px;letter-spacing:6px;font-weight:bold\">{code}</p>\
             <p>The code expires in {valid_for_minutes} minutes. \
             If you did not ask for a reset you can ignore this email.</p>"
        )
    }
}

#[async_trait]
impl PasswordResetNotifier for ResetEmailService {
    async fn send_reset_code(
        &self,
        email: &str,
        username: &str,
        code: &str,
        valid_for_minutes: i64,
    ) -> Result<(), PasswordResetNotificationError> {
        let body = Self::render(username, code, valid_for_minutes);

        self.sender
            .send_email(email, RESET_SUBJECT, &body)
            .await
            .map_err(|e| {
                error!(username, error = %e, "Failed to send reset code");
                PasswordResetNotificationError::EmailSendingFailed(e.to_string())
            })?;

        info!(username, "Reset code sent");
        Ok(())
    }
}

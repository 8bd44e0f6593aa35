#[derive(Debug, thiserror::Error)]
pub enum PasswordResetNotificationError {
    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

/// Delivers a one-time password-reset code to the account owner.
#[async_trait::async_trait]
pub trait PasswordResetNotifier: Send + Sync {
    async fn send_reset_code(
        &self,
        email: &str,
        username: &str,
        code: &str,
        valid_for_minutes: i64,
    ) -> Result<(), PasswordResetNotificationError>;
}

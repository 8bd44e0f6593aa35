use std::env;

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{
    message::header::ContentType, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

use crate::email::application::ports::outgoing::{EmailSendError, EmailSender};

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Message) -> Result<(), String>;
}

#[async_trait]
impl Mailer for AsyncSmtpTransport<Tokio1Executor> {
    async fn send(&self, email: Message) -> Result<(), String> {
        AsyncTransport::send(self, email)
            .await
            .map(|_resp| ())
            .map_err(|e| e.to_string())
    }
}

pub struct SmtpEmailSender {
    mailer: Box<dyn Mailer>,
    from_email: String,
}

impl SmtpEmailSender {
    pub fn new_with_mailer(mailer: Box<dyn Mailer>, from_email: &str) -> Self {
        Self {
            mailer,
            from_email: from_email.to_string(),
        }
    }

    /// Authenticated relay (production).
    pub fn new(
        smtp_server: &str,
        smtp_username: &str,
        smtp_password: &str,
        from_email: &str,
    ) -> Result<Self, EmailSendError> {
        let creds = Credentials::new(smtp_username.to_string(), smtp_password.to_string());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(smtp_server)
            .map_err(|e| EmailSendError::TransportFailed(e.to_string()))?
            .credentials(creds)
            .build();

        Ok(Self::new_with_mailer(Box::new(transport), from_email))
    }

    // Local/test constructor (Mailpit, MailHog, etc.)
    pub fn new_local(host: &str, port: u16, from_email: &str) -> Self {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self::new_with_mailer(Box::new(transport), from_email)
    }

    /// `RUST_ENV=test` talks to a local catcher on `SMTP_HOST`/`SMTP_PORT`;
    /// anything else uses the authenticated relay.
    pub fn from_env() -> Result<Self, EmailSendError> {
        let from_email = env::var("EMAIL_FROM")
            .map_err(|_| EmailSendError::InvalidAddress("EMAIL_FROM not set".into()))?;

        if env::var("RUST_ENV").as_deref() == Ok("test") {
            let host = env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".into());
            let port = env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1025);
            info!(%host, port, "Using local SMTP transport");
            return Ok(Self::new_local(&host, port, &from_email));
        }

        let missing = |name: &str| EmailSendError::TransportFailed(format!("{name} not set"));
        let server = env::var("SMTP_SERVER").map_err(|_| missing("SMTP_SERVER"))?;
        let username = env::var("SMTP_USERNAME").map_err(|_| missing("SMTP_USERNAME"))?;
        let password = env::var("SMTP_PASSWORD").map_err(|_| missing("SMTP_PASSWORD"))?;

        Self::new(&server, &username, &password, &from_email)
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<(), EmailSendError> {
        let from = self
            .from_email
            .parse()
            .map_err(|e| EmailSendError::InvalidAddress(format!("from: {e}")))?;
        let to = to
            .parse()
            .map_err(|e| EmailSendError::InvalidAddress(format!("to: {e}")))?;

        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| EmailSendError::BuildFailed(e.to_string()))?;

        self.mailer
            .send(email)
            .await
            .map_err(EmailSendError::TransportFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingMailer {
        sent: Arc<Mutex<Vec<Message>>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: Message) -> Result<(), String> {
            self.sent.lock().unwrap().push(email);
            Ok(())
        }
    }

    struct PanicMailer;

    #[async_trait]
    impl Mailer for PanicMailer {
        async fn send(&self, _: Message) -> Result<(), String> {
            panic!("mailer must not be reached for invalid input");
        }
    }

    struct FailingMailer;

    #[async_trait]
    impl Mailer for FailingMailer {
        async fn send(&self, _: Message) -> Result<(), String> {
            Err("connection refused".to_string())
        }
    }

    #[tokio::test]
    async fn test_send_email_success() {
        let mailer = RecordingMailer::default();
        let sender = SmtpEmailSender::new_with_mailer(Box::new(mailer.clone()), "studio@example.com");

        let result = sender
            .send_email("client@example.com", "Code", "<p>1234</p>")
            .await;

        assert!(result.is_ok(), "Expected Ok, got {:?}", result);
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let raw = String::from_utf8(sent[0].formatted()).unwrap();
        assert!(raw.contains("To: client@example.com"));
        assert!(raw.contains("Subject: Code"));
    }

    #[tokio::test]
    async fn test_send_email_invalid_from_address() {
        let sender = SmtpEmailSender::new_with_mailer(Box::new(PanicMailer), "invalid-from");

        let result = sender
            .send_email("client@example.com", "Subject", "<p>x</p>")
            .await;

        assert!(matches!(result, Err(EmailSendError::InvalidAddress(msg)) if msg.starts_with("from")));
    }

    #[tokio::test]
    async fn test_send_email_invalid_to_address() {
        let sender = SmtpEmailSender::new_with_mailer(Box::new(PanicMailer), "studio@example.com");

        let result = sender.send_email("not-an-email", "Subject", "<p>x</p>").await;

        assert!(matches!(result, Err(EmailSendError::InvalidAddress(msg)) if msg.starts_with("to")));
    }

    #[tokio::test]
    async fn test_send_email_transport_failure() {
        let sender = SmtpEmailSender::new_with_mailer(Box::new(FailingMailer), "studio@example.com");

        let result = sender
            .send_email("client@example.com", "Subject", "<p>x</p>")
            .await;

        assert_eq!(
            result,
            Err(EmailSendError::TransportFailed("connection refused".into()))
        );
    }
}

//! Email delivery.
//!
//! `SmtpEmailClient` sends through lettre; `LogEmailClient` only logs and is
//! used when no SMTP host is configured.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use uuid::Uuid;

use crate::config::EmailSettings;
use crate::domain::{EmailAddress, EmailMessage};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Email client trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmailClient: Send + Sync {
    /// Send the message once and return the transport's delivery id
    async fn send_mail(&self, message: &EmailMessage) -> AppResult<String>;
}

/// Pick the client for the configured settings.
pub fn build_email_client(settings: &EmailSettings) -> AppResult<Arc<dyn EmailClient>> {
    match &settings.host {
        Some(_) => Ok(Arc::new(SmtpEmailClient::new(settings)?)),
        None => {
            tracing::warn!("email.host not set, outgoing mail will only be logged");
            Ok(Arc::new(LogEmailClient))
        }
    }
}

/// SMTP client
pub struct SmtpEmailClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailClient {
    pub fn new(settings: &EmailSettings) -> AppResult<Self> {
        let host = settings
            .host
            .as_deref()
            .ok_or_else(|| AppError::internal("SMTP client requires email.host"))?;

        let credentials = (!settings.username.is_empty()).then(|| {
            Credentials::new(settings.username.clone(), settings.password().to_string())
        });

        let builder = if settings.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                .map_err(|e| AppError::Transport(format!("Failed to create SMTP relay: {e}")))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
        };

        let builder = builder.port(settings.port);
        let transport = match credentials {
            Some(credentials) => builder.credentials(credentials).build(),
            None => builder.build(),
        };

        tracing::info!(%host, port = settings.port, secure = settings.secure, "SMTP client configured");
        Ok(Self { transport })
    }
}

fn mailbox(address: &EmailAddress) -> AppResult<Mailbox> {
    address
        .as_str()
        .parse()
        .map_err(|e| AppError::Transport(format!("Invalid address {address}: {e}")))
}

/// Convert into a multipart text + html lettre message.
pub fn build_message(message: &EmailMessage) -> AppResult<Message> {
    let mut builder = Message::builder()
        .from(mailbox(message.from())?)
        .subject(message.subject());

    for to in message.to() {
        builder = builder.to(mailbox(to)?);
    }
    for cc in message.cc() {
        builder = builder.cc(mailbox(cc)?);
    }
    for bcc in message.bcc() {
        builder = builder.bcc(mailbox(bcc)?);
    }

    builder
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(message.text().to_string()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(message.html().to_string()),
                ),
        )
        .map_err(|e| AppError::Transport(format!("Failed to build message: {e}")))
}

#[async_trait]
impl EmailClient for SmtpEmailClient {
    async fn send_mail(&self, message: &EmailMessage) -> AppResult<String> {
        let email = build_message(message)?;

        let response = self
            .transport
            .send(email)
            .await
            .map_err(|e| AppError::Transport(format!("Failed to send email via SMTP: {e}")))?;

        let delivery_id = response
            .message()
            .next()
            .map(|s| s.to_string())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        tracing::info!(
            %delivery_id,
            recipients = message.to().len(),
            subject = message.subject(),
            "Email sent"
        );
        Ok(delivery_id)
    }
}

/// Development client: logs the message instead of sending it.
pub struct LogEmailClient;

#[async_trait]
impl EmailClient for LogEmailClient {
    async fn send_mail(&self, message: &EmailMessage) -> AppResult<String> {
        let delivery_id = format!("log-{}", Uuid::new_v4());
        let to: Vec<&str> = message.to().iter().map(EmailAddress::as_str).collect();

        tracing::info!(
            %delivery_id,
            from = %message.from(),
            to = ?to,
            subject = message.subject(),
            text = message.text(),
            "Email not sent, no SMTP host configured"
        );
        Ok(delivery_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::{NonEmptyString, NonEmptyString50};

    fn sample_message() -> EmailMessage {
        EmailMessage::new(
            EmailAddress::parse("noreply@example.com").unwrap(),
            vec![EmailAddress::parse("new@mail.com").unwrap()],
            NonEmptyString50::parse("Confirm your registration").unwrap(),
            NonEmptyString::parse("Visit the link").unwrap(),
            NonEmptyString::parse("<p>Visit the link</p>").unwrap(),
        )
        .unwrap()
        .with_bcc(vec![EmailAddress::parse("audit@example.com").unwrap()])
    }

    #[test]
    fn test_build_message_is_multipart() {
        let email = build_message(&sample_message()).unwrap();
        let raw = String::from_utf8(email.formatted()).unwrap();

        assert!(raw.contains("To: new@mail.com"));
        assert!(raw.contains("Subject: Confirm your registration"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/plain"));
        assert!(raw.contains("text/html"));
    }

    #[tokio::test]
    async fn test_log_client_returns_delivery_id() {
        let id = LogEmailClient.send_mail(&sample_message()).await.unwrap();
        assert!(id.starts_with("log-"));
    }

    #[test]
    fn test_unset_host_selects_log_client() {
        let config = Config::default();
        assert!(build_email_client(&config.email).is_ok());
    }
}

//! Registration service - Self-service sign-up with email confirmation.
//!
//! A registration stores the hashed password under a fresh id and mails a
//! confirmation link carrying that id. Confirming promotes the pending
//! registration into a user with the `user` role.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::config::{
    Config, REGISTRATION_SUBJECT, TEMPLATE_REGISTRATION_HTML, TEMPLATE_REGISTRATION_TEXT,
};
use crate::domain::{
    Credentials, EmailAddress, EmailMessage, NonEmptyString, NonEmptyString50, RegistrationId,
    UserId,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{EmailClient, TemplateEngine, UnitOfWork};

/// Registration service trait for dependency injection.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Store a pending registration and mail the confirmation link
    async fn register(&self, credentials: Credentials) -> AppResult<EmailAddress>;

    /// Turn a pending registration into a user
    async fn confirm(&self, registration_id: RegistrationId) -> AppResult<UserId>;
}

/// Sender address and link target of confirmation mails.
#[derive(Debug, Clone)]
pub struct ConfirmationMail {
    pub from: EmailAddress,
    pub confirm_url: String,
}

impl ConfirmationMail {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let from = EmailAddress::parse(config.email.from.as_str())
            .map_err(|e| AppError::internal(format!("email.from is invalid: {e}")))?;
        Ok(Self {
            from,
            confirm_url: config.confirm_url.clone(),
        })
    }

    pub fn link(&self, registration_id: RegistrationId) -> String {
        let separator = if self.confirm_url.contains('?') { '&' } else { '?' };
        format!("{}{separator}registrationId={registration_id}", self.confirm_url)
    }
}

/// Concrete implementation of RegistrationService using Unit of Work.
pub struct RegistrationManager<U: UnitOfWork> {
    uow: Arc<U>,
    templates: Arc<TemplateEngine>,
    email_client: Arc<dyn EmailClient>,
    mail: ConfirmationMail,
}

impl<U: UnitOfWork> RegistrationManager<U> {
    pub fn new(
        uow: Arc<U>,
        templates: Arc<TemplateEngine>,
        email_client: Arc<dyn EmailClient>,
        mail: ConfirmationMail,
    ) -> Self {
        Self {
            uow,
            templates,
            email_client,
            mail,
        }
    }

    async fn confirmation_message(
        &self,
        recipient: &EmailAddress,
        registration_id: RegistrationId,
    ) -> AppResult<EmailMessage> {
        let data = json!({
            "emailAddress": recipient.as_str(),
            "registrationId": registration_id.to_string(),
            "confirmUrl": self.mail.link(registration_id),
        });

        let text = self.templates.render(TEMPLATE_REGISTRATION_TEXT, &data).await?;
        let html = self.templates.render(TEMPLATE_REGISTRATION_HTML, &data).await?;

        let build = || -> Result<EmailMessage, crate::domain::ValidationError> {
            EmailMessage::new(
                self.mail.from.clone(),
                vec![recipient.clone()],
                NonEmptyString50::parse(REGISTRATION_SUBJECT)?,
                NonEmptyString::parse(text)?,
                NonEmptyString::parse(html)?,
            )
        };
        build().map_err(|e| AppError::internal(format!("Confirmation mail is invalid: {e}")))
    }
}

#[async_trait]
impl<U: UnitOfWork> RegistrationService for RegistrationManager<U> {
    async fn register(&self, credentials: Credentials) -> AppResult<EmailAddress> {
        let users = self.uow.users();
        if users.find_by_email(&credentials.email_address).await?.is_some() {
            return Err(AppError::validation(format!(
                "Email address {} is already in use",
                credentials.email_address
            )));
        }

        let registration_id = users.register(&credentials).await?;
        let message = self
            .confirmation_message(&credentials.email_address, registration_id)
            .await?;
        let delivery_id = self.email_client.send_mail(&message).await?;

        tracing::info!(
            %registration_id,
            email_address = %credentials.email_address,
            %delivery_id,
            "Registration pending confirmation"
        );
        Ok(credentials.email_address)
    }

    async fn confirm(&self, registration_id: RegistrationId) -> AppResult<UserId> {
        let user_id = self
            .uow
            .users()
            .confirm_registration(registration_id)
            .await?;
        tracing::info!(%registration_id, %user_id, "Registration confirmed");
        Ok(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail(confirm_url: &str) -> ConfirmationMail {
        ConfirmationMail {
            from: EmailAddress::parse("noreply@example.com").unwrap(),
            confirm_url: confirm_url.to_string(),
        }
    }

    #[test]
    fn test_link_appends_registration_id() {
        let id = RegistrationId::parse("123e4567-e89b-12d3-a456-426614174000").unwrap();
        assert_eq!(
            mail("http://localhost:3000/confirm").link(id),
            "http://localhost:3000/confirm?registrationId=123e4567-e89b-12d3-a456-426614174000"
        );
        assert_eq!(
            mail("https://admin.example.com/confirm?lang=en").link(id),
            "https://admin.example.com/confirm?lang=en&registrationId=123e4567-e89b-12d3-a456-426614174000"
        );
    }

    #[test]
    fn test_invalid_sender_is_rejected() {
        let mut config = Config::default();
        config.email.from = "not@me".to_string();
        assert!(ConfirmationMail::from_config(&config).is_err());
    }
}

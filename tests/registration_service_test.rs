//! Registration service tests: pending registration, mail, confirmation.

mod common;

use std::fs;
use std::sync::Arc;

use mockall::predicate::eq;
use tempfile::TempDir;

use admin_panel::domain::{RegistrationId, UserId};
use admin_panel::errors::AppError;
use admin_panel::infra::{MockEmailClient, MockUserRepository, TemplateEngine};
use admin_panel::services::{ConfirmationMail, RegistrationManager, RegistrationService};

use common::{credentials, email, test_user, TestUnitOfWork};

const REGISTRATION_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

fn templates() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("registration-confirmation.text.hbs"),
        "Confirm {{emailAddress}} at {{{confirmUrl}}}",
    )
    .unwrap();
    fs::write(
        dir.path().join("registration-confirmation.html.hbs"),
        "<a href=\"{{confirmUrl}}\">Confirm {{emailAddress}}</a>",
    )
    .unwrap();
    dir
}

fn service(
    repo: MockUserRepository,
    email_client: MockEmailClient,
    dir: &TempDir,
) -> RegistrationManager<TestUnitOfWork> {
    RegistrationManager::new(
        Arc::new(TestUnitOfWork::new(repo)),
        Arc::new(TemplateEngine::new(dir.path())),
        Arc::new(email_client),
        ConfirmationMail {
            from: email("noreply@example.com"),
            confirm_url: "http://localhost:3000/confirm".to_string(),
        },
    )
}

#[tokio::test]
async fn test_register_mails_confirmation_link() {
    let dir = templates();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));
    repo.expect_register()
        .withf(|c| c.email_address.as_str() == "new@mail.com")
        .times(1)
        .returning(|_| Ok(RegistrationId::parse(REGISTRATION_ID).unwrap()));

    let mut email_client = MockEmailClient::new();
    email_client
        .expect_send_mail()
        .withf(|message| {
            let link = format!("http://localhost:3000/confirm?registrationId={REGISTRATION_ID}");
            message.to().len() == 1
                && message.to()[0].as_str() == "new@mail.com"
                && message.from().as_str() == "noreply@example.com"
                && message.subject() == "Confirm your registration"
                && message.text() == format!("Confirm new@mail.com at {link}")
                && message.html().contains(REGISTRATION_ID)
        })
        .times(1)
        .returning(|_| Ok("delivery-1".to_string()));

    let address = service(repo, email_client, &dir)
        .register(credentials("new@mail.com", "correct-horse-battery"))
        .await
        .unwrap();
    assert_eq!(address.as_str(), "new@mail.com");
}

#[tokio::test]
async fn test_register_existing_user_is_rejected_before_storing() {
    let dir = templates();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .returning(|e| Ok(Some(test_user(1, e.as_str()))));
    repo.expect_register().never();

    let mut email_client = MockEmailClient::new();
    email_client.expect_send_mail().never();

    let result = service(repo, email_client, &dir)
        .register(credentials("taken@mail.com", "correct-horse-battery"))
        .await;
    assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("already in use")));
}

#[tokio::test]
async fn test_register_without_templates_is_render_error() {
    let empty = TempDir::new().unwrap();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));
    repo.expect_register()
        .returning(|_| Ok(RegistrationId::parse(REGISTRATION_ID).unwrap()));

    let mut email_client = MockEmailClient::new();
    email_client.expect_send_mail().never();

    let result = service(repo, email_client, &empty)
        .register(credentials("new@mail.com", "correct-horse-battery"))
        .await;
    assert!(matches!(result, Err(AppError::Render(_))));
}

#[tokio::test]
async fn test_register_reports_transport_failure() {
    let dir = templates();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));
    repo.expect_register()
        .returning(|_| Ok(RegistrationId::parse(REGISTRATION_ID).unwrap()));

    let mut email_client = MockEmailClient::new();
    email_client
        .expect_send_mail()
        .times(1)
        .returning(|_| Err(AppError::Transport("connection refused".to_string())));

    let result = service(repo, email_client, &dir)
        .register(credentials("new@mail.com", "correct-horse-battery"))
        .await;
    assert!(matches!(result, Err(AppError::Transport(_))));
}

#[tokio::test]
async fn test_confirm_returns_new_user_id() {
    let dir = templates();
    let registration_id = RegistrationId::parse(REGISTRATION_ID).unwrap();

    let mut repo = MockUserRepository::new();
    repo.expect_confirm_registration()
        .with(eq(registration_id))
        .times(1)
        .returning(|_| Ok(UserId::new(12).unwrap()));

    let user_id = service(repo, MockEmailClient::new(), &dir)
        .confirm(registration_id)
        .await
        .unwrap();
    assert_eq!(user_id.value(), 12);
}

#[tokio::test]
async fn test_confirm_unknown_registration_creates_nothing() {
    let dir = templates();

    let mut repo = MockUserRepository::new();
    repo.expect_confirm_registration()
        .returning(|_| Err(AppError::not_found("No such registration")));
    repo.expect_create().never();

    let result = service(repo, MockEmailClient::new(), &dir)
        .confirm(RegistrationId::parse(REGISTRATION_ID).unwrap())
        .await;
    assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "No such registration"));
}

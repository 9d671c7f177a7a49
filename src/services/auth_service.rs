//! Authentication service - Verifies credentials against stored hashes.
//!
//! No session or token is issued: a successful login returns the user.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Credentials, PasswordHash, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Return the user whose email and password match
    async fn login(&self, credentials: Credentials) -> AppResult<User>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, credentials: Credentials) -> AppResult<User> {
        let user = self
            .uow
            .users()
            .find_by_email(&credentials.email_address)
            .await?;

        // Verify even when the user is unknown so both failures cost the same
        let password_hash = user
            .as_ref()
            .map(|user| user.password_hash.clone())
            .unwrap_or_else(PasswordHash::dummy);
        let password_valid = password_hash.verify_blocking(&credentials.password).await?;

        match user {
            Some(user) if password_valid => {
                tracing::info!(user_id = %user.user_id, "Login succeeded");
                Ok(user)
            }
            _ => {
                tracing::info!(email_address = %credentials.email_address, "Login failed");
                Err(AppError::InvalidCredentials)
            }
        }
    }
}

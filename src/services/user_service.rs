//! User service - Handles user-related business logic.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Credentials, User, UserId, UserUpdate};
use crate::errors::{AppResult, OptionExt, NO_SUCH_RESOURCE};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get user by ID
    async fn get_user(&self, user_id: UserId) -> AppResult<User>;

    /// Create a user with the `user` role
    async fn create_user(&self, credentials: Credentials) -> AppResult<UserId>;

    /// Update email address and optionally password
    async fn update_user(&self, update: UserUpdate) -> AppResult<UserId>;

    /// Delete user by ID
    async fn delete_user(&self, user_id: UserId) -> AppResult<UserId>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().find_all().await
    }

    async fn get_user(&self, user_id: UserId) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found(NO_SUCH_RESOURCE)
    }

    async fn create_user(&self, credentials: Credentials) -> AppResult<UserId> {
        let user_id = self.uow.users().create(&credentials).await?;
        tracing::info!(%user_id, email_address = %credentials.email_address, "User created");
        Ok(user_id)
    }

    async fn update_user(&self, update: UserUpdate) -> AppResult<UserId> {
        let user_id = self.uow.users().update(&update).await?;
        tracing::info!(%user_id, password_changed = update.password.is_some(), "User updated");
        Ok(user_id)
    }

    async fn delete_user(&self, user_id: UserId) -> AppResult<UserId> {
        let user_id = self.uow.users().delete(user_id).await?;
        tracing::info!(%user_id, "User deleted");
        Ok(user_id)
    }
}

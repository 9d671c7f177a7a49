//! Role service - Read-only role lookups.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Role, RoleName};
use crate::errors::{AppResult, OptionExt, NO_SUCH_RESOURCE};
use crate::infra::UnitOfWork;

/// Role service trait for dependency injection.
#[async_trait]
pub trait RoleService: Send + Sync {
    /// List all roles
    async fn list_roles(&self) -> AppResult<Vec<Role>>;

    /// Get role by name
    async fn get_role(&self, role_name: RoleName) -> AppResult<Role>;
}

/// Concrete implementation of RoleService using Unit of Work.
pub struct RoleManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RoleManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> RoleService for RoleManager<U> {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.uow.roles().find_all().await
    }

    async fn get_role(&self, role_name: RoleName) -> AppResult<Role> {
        self.uow
            .roles()
            .find_by_name(role_name)
            .await?
            .ok_or_not_found(NO_SUCH_RESOURCE)
    }
}

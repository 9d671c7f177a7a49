//! Role repository. Roles are seeded by migration and read-only at runtime.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbBackend, FromQueryResult, Statement};

use super::rows::{decode_role, RoleRow};
use crate::domain::{Role, RoleName};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const SELECT_ALL_ROLES: &str =
    "SELECT role_id, role_name, role_description, created_at FROM roles ORDER BY role_id";
const SELECT_ROLE_BY_NAME: &str =
    "SELECT role_id, role_name, role_description, created_at FROM roles WHERE role_name = $1";

/// Role repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// List every role
    async fn find_all(&self) -> AppResult<Vec<Role>>;

    /// Find role by name
    async fn find_by_name(&self, role_name: RoleName) -> AppResult<Option<Role>>;
}

/// Concrete implementation of RoleRepository
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepository for RoleStore {
    async fn find_all(&self) -> AppResult<Vec<Role>> {
        let rows = RoleRow::find_by_statement(Statement::from_string(
            DbBackend::Postgres,
            SELECT_ALL_ROLES.to_string(),
        ))
        .all(&self.db)
        .await?;

        rows.into_iter().map(decode_role).collect()
    }

    async fn find_by_name(&self, role_name: RoleName) -> AppResult<Option<Role>> {
        RoleRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            SELECT_ROLE_BY_NAME,
            [role_name.as_str().into()],
        ))
        .one(&self.db)
        .await?
        .map(decode_role)
        .transpose()
    }
}

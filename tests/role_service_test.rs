//! Role service tests.

mod common;

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;

use admin_panel::domain::{Role, RoleId, RoleName};
use admin_panel::errors::AppError;
use admin_panel::infra::{MockRoleRepository, MockUserRepository};
use admin_panel::services::{RoleManager, RoleService};

use common::TestUnitOfWork;

fn role(id: i64, role_name: RoleName) -> Role {
    Role {
        role_id: RoleId::new(id).unwrap(),
        role_name,
        role_description: format!("{role_name} role"),
        created_at: Utc::now(),
    }
}

fn service(roles: MockRoleRepository) -> RoleManager<TestUnitOfWork> {
    RoleManager::new(Arc::new(TestUnitOfWork::with_roles(
        MockUserRepository::new(),
        roles,
    )))
}

#[tokio::test]
async fn test_list_roles() {
    let mut repo = MockRoleRepository::new();
    repo.expect_find_all()
        .returning(|| Ok(vec![role(1, RoleName::User), role(2, RoleName::Admin)]));

    let roles = service(repo).list_roles().await.unwrap();
    let names: Vec<_> = roles.iter().map(|r| r.role_name).collect();
    assert_eq!(names, vec![RoleName::User, RoleName::Admin]);
}

#[tokio::test]
async fn test_get_role_by_name() {
    let mut repo = MockRoleRepository::new();
    repo.expect_find_by_name()
        .with(eq(RoleName::Admin))
        .times(1)
        .returning(|name| Ok(Some(role(2, name))));

    let admin = service(repo).get_role(RoleName::Admin).await.unwrap();
    assert_eq!(admin.role_id.value(), 2);
}

#[tokio::test]
async fn test_missing_role_is_not_found() {
    let mut repo = MockRoleRepository::new();
    repo.expect_find_by_name().returning(|_| Ok(None));

    assert!(matches!(
        service(repo).get_role(RoleName::User).await,
        Err(AppError::NotFound(_))
    ));
}

//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;

use admin_panel::domain::{
    Credentials, EmailAddress, Password, PasswordHash, RoleName, User, UserId,
};
use admin_panel::infra::{
    MockRoleRepository, MockUserRepository, RoleRepository, UnitOfWork, UserRepository,
};

/// UnitOfWork over mockall repositories
pub struct TestUnitOfWork {
    user_repo: Arc<MockUserRepository>,
    role_repo: Arc<MockRoleRepository>,
}

impl TestUnitOfWork {
    pub fn new(user_repo: MockUserRepository) -> Self {
        Self::with_roles(user_repo, MockRoleRepository::new())
    }

    pub fn with_roles(user_repo: MockUserRepository, role_repo: MockRoleRepository) -> Self {
        Self {
            user_repo: Arc::new(user_repo),
            role_repo: Arc::new(role_repo),
        }
    }
}

impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn roles(&self) -> Arc<dyn RoleRepository> {
        self.role_repo.clone()
    }
}

pub fn email(raw: &str) -> EmailAddress {
    EmailAddress::parse(raw).unwrap()
}

pub fn credentials(raw_email: &str, raw_password: &str) -> Credentials {
    Credentials {
        email_address: email(raw_email),
        password: Password::parse(raw_password).unwrap(),
    }
}

/// User whose hash does not match any test password
pub fn test_user(id: i64, raw_email: &str) -> User {
    user_with_hash(id, raw_email, PasswordHash::dummy())
}

pub fn user_with_hash(id: i64, raw_email: &str, password_hash: PasswordHash) -> User {
    User {
        user_id: UserId::new(id).unwrap(),
        email_address: email(raw_email),
        password_hash,
        role_names: vec![RoleName::User],
        created_at: Utc::now(),
    }
}

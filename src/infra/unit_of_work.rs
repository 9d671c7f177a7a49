//! Unit of Work: one access point for every repository.
//!
//! Services depend on this trait instead of individual repositories.
//! Operations that must be atomic (registration confirmation) run their
//! transaction inside the repository.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{RoleRepository, RoleStore, UserRepository, UserStore};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get role repository
    fn roles(&self) -> Arc<dyn RoleRepository>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    user_repo: Arc<UserStore>,
    role_repo: Arc<RoleStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            role_repo: Arc::new(RoleStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn roles(&self) -> Arc<dyn RoleRepository> {
        self.role_repo.clone()
    }
}

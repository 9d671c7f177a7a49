//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;
use crate::services::{
    AuthService, RegistrationService, RoleService, ServiceContainer, Services, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Role service
    pub role_service: Arc<dyn RoleService>,
    /// Registration service
    pub registration_service: Arc<dyn RegistrationService>,
    /// Database connection, used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a database and config.
    pub fn from_config(database: Arc<Database>, config: &Config) -> AppResult<Self> {
        let services = Services::from_connection(database.get_connection(), config)?;
        Ok(Self::from_container(&services, database))
    }

    /// Take every service from a container.
    pub fn from_container(services: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            role_service: services.roles(),
            registration_service: services.registrations(),
            database,
        }
    }
}

//! Service Container - Centralized service access.
//!
//! Handlers reach every use case through this container, so tests can
//! swap any service for a stub without touching the router.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, ConfirmationMail, RegistrationManager, RegistrationService,
    RoleManager, RoleService, UserManager, UserService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{build_email_client, Persistence, TemplateEngine};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get role service
    fn roles(&self) -> Arc<dyn RoleService>;

    /// Get registration service
    fn registrations(&self) -> Arc<dyn RegistrationService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    role_service: Arc<dyn RoleService>,
    registration_service: Arc<dyn RegistrationService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        role_service: Arc<dyn RoleService>,
        registration_service: Arc<dyn RegistrationService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            role_service,
            registration_service,
        }
    }

    /// Wire every service from a database connection and config.
    ///
    /// Fails when the mail transport or sender address is misconfigured.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> AppResult<Self> {
        let uow = Arc::new(Persistence::new(db));
        let templates = Arc::new(TemplateEngine::new(config.templates_dir.clone()));
        let email_client = build_email_client(&config.email)?;
        let mail = ConfirmationMail::from_config(config)?;

        Ok(Self {
            auth_service: Arc::new(Authenticator::new(uow.clone())),
            user_service: Arc::new(UserManager::new(uow.clone())),
            role_service: Arc::new(RoleManager::new(uow.clone())),
            registration_service: Arc::new(RegistrationManager::new(
                uow,
                templates,
                email_client,
                mail,
            )),
        })
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn roles(&self) -> Arc<dyn RoleService> {
        self.role_service.clone()
    }

    fn registrations(&self) -> Arc<dyn RegistrationService> {
        self.registration_service.clone()
    }
}

//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - Unit of Work for repository access
//! - Email transport
//! - Template rendering

pub mod db;
pub mod email;
pub mod repositories;
pub mod templates;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use email::{build_email_client, EmailClient, LogEmailClient, SmtpEmailClient};
pub use repositories::{RoleRepository, RoleStore, UserRepository, UserStore};
pub use templates::{RenderError, TemplateEngine};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use email::MockEmailClient;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockRoleRepository, MockUserRepository};

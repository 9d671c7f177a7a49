//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion and reach repositories through the Unit of Work.

mod auth_service;
pub mod container;
mod registration_service;
mod role_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator};
pub use registration_service::{ConfirmationMail, RegistrationManager, RegistrationService};
pub use role_service::{RoleManager, RoleService};
pub use user_service::{UserManager, UserService};

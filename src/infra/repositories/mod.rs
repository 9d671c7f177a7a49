//! Repository layer - Data access abstraction
//!
//! Repositories translate domain operations into parameterized SQL and
//! stored function calls, and decode rows back into validated entities.

mod role_repository;
pub(crate) mod rows;
mod user_repository;

pub use role_repository::{RoleRepository, RoleStore};
pub use rows::{RoleRow, UserRow};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use role_repository::MockRoleRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

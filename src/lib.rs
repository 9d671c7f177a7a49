//! Admin Panel - REST backend for user, role and registration administration.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Validated values, entities and request renditions
//! - **services**: Application use cases
//! - **infra**: Database, repositories, email and templates
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: Shared response bodies
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! admin-panel serve
//!
//! # Run migrations
//! admin-panel migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{EmailAddress, Password, Role, RoleName, User};
pub use errors::{AppError, AppResult};

//! Application configuration module
//!
//! Handles the JSON/environment key store, typed settings and
//! application-wide constants.

mod constants;
mod settings;
mod store;

pub use constants::*;
pub use settings::{Config, EmailSettings};
pub use store::{env_name, ConfigError, ConfigStore};

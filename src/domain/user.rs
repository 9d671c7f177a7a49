//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::password::{Password, PasswordHash};
use super::role::RoleName;
use super::types::{EmailAddress, UserId};

/// User domain entity.
///
/// Not serializable on purpose: HTTP responses go through [`UserResponse`],
/// which has no hash field.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub user_id: UserId,
    pub email_address: EmailAddress,
    pub password_hash: PasswordHash,
    /// Non-empty, without duplicates.
    pub role_names: Vec<RoleName>,
    pub created_at: DateTime<Utc>,
}

/// Email address and plaintext password, as submitted for login,
/// user creation and registration.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email_address: EmailAddress,
    pub password: Password,
}

/// Replacement values for an existing user. The password is only
/// re-hashed when one is given.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub user_id: UserId,
    pub email_address: EmailAddress,
    pub password: Option<Password>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = 1)]
    pub user_id: i64,
    #[schema(example = "admin@example.com")]
    pub email_address: String,
    #[schema(example = json!(["user", "admin"]))]
    pub role_names: Vec<RoleName>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id.value(),
            email_address: user.email_address.into_inner(),
            role_names: user.role_names,
            created_at: user.created_at,
        }
    }
}

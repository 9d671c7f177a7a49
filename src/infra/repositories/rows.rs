//! Raw store rows and their decoding into domain entities.
//!
//! Rows are re-validated through the same constructors that guard request
//! input. A row that fails is a data integrity problem, not a client error.

use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;

use crate::domain::{
    EmailAddress, FieldErrors, PasswordHash, Role, RoleId, RoleName, User, UserId,
    ValidationError,
};
use crate::errors::AppError;

/// Row shape returned by the user lookup functions.
#[derive(Debug, Clone, FromQueryResult)]
pub struct UserRow {
    pub user_id: i64,
    pub email_address: String,
    pub password_hash: String,
    /// Comma-joined role names.
    pub role_names: String,
    pub created_at: DateTime<Utc>,
}

/// Row shape of the `roles` table.
#[derive(Debug, Clone, FromQueryResult)]
pub struct RoleRow {
    pub role_id: i32,
    pub role_name: String,
    pub role_description: String,
    pub created_at: DateTime<Utc>,
}

fn decode_role_names(raw: &str) -> Result<Vec<RoleName>, ValidationError> {
    let mut errors = FieldErrors::new();
    let mut names = Vec::new();

    for part in raw.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        if let Some(name) = errors.check(RoleName::parse(part)) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    if names.is_empty() && errors.is_empty() {
        errors.push("User has no roles");
    }
    errors.into_result()?;
    Ok(names)
}

impl TryFrom<UserRow> for User {
    type Error = ValidationError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let user_id = errors.check(UserId::new(row.user_id));
        let email_address = errors.check(EmailAddress::parse(row.email_address));
        let password_hash = errors.check(PasswordHash::parse(row.password_hash));
        let role_names = errors.check(decode_role_names(&row.role_names));

        match (user_id, email_address, password_hash, role_names) {
            (Some(user_id), Some(email_address), Some(password_hash), Some(role_names)) => {
                Ok(User {
                    user_id,
                    email_address,
                    password_hash,
                    role_names,
                    created_at: row.created_at,
                })
            }
            _ => Err(errors
                .into_result()
                .err()
                .unwrap_or_else(|| ValidationError::new("Incomplete user record"))),
        }
    }
}

impl TryFrom<RoleRow> for Role {
    type Error = ValidationError;

    fn try_from(row: RoleRow) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let role_id = errors.check(RoleId::new(i64::from(row.role_id)));
        let role_name = errors.check(RoleName::parse(&row.role_name));

        match (role_id, role_name) {
            (Some(role_id), Some(role_name)) => Ok(Role {
                role_id,
                role_name,
                role_description: row.role_description,
                created_at: row.created_at,
            }),
            _ => Err(errors
                .into_result()
                .err()
                .unwrap_or_else(|| ValidationError::new("Incomplete role record"))),
        }
    }
}

/// Decode a user row, reporting corruption as a data integrity error.
pub(crate) fn decode_user(row: UserRow) -> Result<User, AppError> {
    let user_id = row.user_id;
    User::try_from(row).map_err(|e| {
        tracing::error!(user_id, error = %e, "Stored user failed validation");
        AppError::data_integrity(format!("User {user_id}: {e}"))
    })
}

/// Decode a role row, reporting corruption as a data integrity error.
pub(crate) fn decode_role(row: RoleRow) -> Result<Role, AppError> {
    let role_id = row.role_id;
    Role::try_from(row).map_err(|e| {
        tracing::error!(role_id, error = %e, "Stored role failed validation");
        AppError::data_integrity(format!("Role {role_id}: {e}"))
    })
}

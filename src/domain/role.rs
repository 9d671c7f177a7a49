//! Role entity and role names.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::types::RoleId;
use super::validation::ValidationError;
use crate::config::{ROLE_ADMIN, ROLE_USER};

/// The closed set of role names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    User,
    Admin,
}

impl RoleName {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw {
            ROLE_USER => Ok(RoleName::User),
            ROLE_ADMIN => Ok(RoleName::Admin),
            _ => Err(ValidationError::new("Invalid role name")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::User => ROLE_USER,
            RoleName::Admin => ROLE_ADMIN,
        }
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role as exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub role_id: RoleId,
    #[schema(example = "admin")]
    pub role_name: RoleName,
    #[schema(example = "Administrator with full access")]
    pub role_description: String,
    pub created_at: DateTime<Utc>,
}

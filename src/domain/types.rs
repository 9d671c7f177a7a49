//! Validated primitive values.
//!
//! Every constructor is total: raw input goes in, either a value or a
//! [`ValidationError`] comes out. Valid input is returned unchanged.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::validation::ValidationError;
use crate::config::{MAX_EMAIL_LENGTH, MAX_EMAIL_LOCAL_PART_LENGTH, MAX_SHORT_STRING_LENGTH};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
    )
    .expect("email pattern is valid")
});

/// Text with at least one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ValidationError::new("Value has no content"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Non-empty text of at most 50 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NonEmptyString50(String);

impl NonEmptyString50 {
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = NonEmptyString::parse(raw)?.0;
        let length = raw.chars().count();
        if length > MAX_SHORT_STRING_LENGTH {
            return Err(ValidationError::new(format!(
                "Value of length {length} exceeds {MAX_SHORT_STRING_LENGTH} characters"
            )));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[schema(value_type = String, example = "admin@example.com")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ValidationError::new("Email address has no content"));
        }

        let local_too_long = raw
            .rsplit_once('@')
            .map(|(local, _)| local.chars().count() > MAX_EMAIL_LOCAL_PART_LENGTH)
            .unwrap_or(false);

        if raw.chars().count() > MAX_EMAIL_LENGTH || local_too_long || !EMAIL_REGEX.is_match(&raw)
        {
            return Err(ValidationError::new(format!("Email address {raw} is not valid")));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier as it arrives on the wire: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Number(n) => write!(f, "{n}"),
            RawId::Text(s) => f.write_str(s),
        }
    }
}

/// Positive integer identifiers backed by `BIGSERIAL`/`SERIAL` columns.
macro_rules! numeric_id {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
        #[schema(value_type = i64, example = 1)]
        pub struct $name(i64);

        impl $name {
            pub fn new(value: i64) -> Result<Self, ValidationError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(ValidationError::new(format!(
                        concat!($label, " {} is not a positive integer"),
                        value
                    )))
                }
            }

            pub fn parse(raw: &str) -> Result<Self, ValidationError> {
                raw.parse::<i64>()
                    .map_err(|_| {
                        ValidationError::new(format!(
                            concat!($label, " {} is not a positive integer"),
                            raw
                        ))
                    })
                    .and_then(Self::new)
            }

            pub fn from_raw(raw: &RawId) -> Result<Self, ValidationError> {
                match raw {
                    RawId::Number(n) => Self::new(*n),
                    RawId::Text(s) => Self::parse(s),
                }
            }

            pub fn value(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(UserId, "User id");
numeric_id!(RoleId, "Role id");

/// Identifier of a pending registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[schema(value_type = String, format = Uuid)]
pub struct RegistrationId(Uuid);

impl RegistrationId {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| ValidationError::new(format!("Registration id {raw} is not a valid UUID")))
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

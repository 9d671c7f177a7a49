//! Request payloads ("renditions") and their conversion into commands.
//!
//! Field validation delegates to the smart constructors through
//! `validator` custom functions, so the request extractor and the
//! conversions below agree on what is valid.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::password::Password;
use super::types::{EmailAddress, RawId, RegistrationId, UserId};
use super::user::{Credentials, UserUpdate};
use super::validation::{FieldErrors, ValidationError};

fn validate_email_address(raw: &str) -> Result<(), validator::ValidationError> {
    EmailAddress::parse(raw)
        .map(|_| ())
        .map_err(|e| e.into_field_error("email_address"))
}

fn validate_password(raw: &str) -> Result<(), validator::ValidationError> {
    Password::parse(raw)
        .map(|_| ())
        .map_err(|e| e.into_field_error("password"))
}

fn validate_user_id(raw: &RawId) -> Result<(), validator::ValidationError> {
    UserId::from_raw(raw)
        .map(|_| ())
        .map_err(|e| e.into_field_error("user_id"))
}

fn validate_registration_id(raw: &str) -> Result<(), validator::ValidationError> {
    RegistrationId::parse(raw)
        .map(|_| ())
        .map_err(|e| e.into_field_error("registration_id"))
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRendition {
    #[validate(custom(function = "validate_email_address"))]
    #[schema(example = "admin@example.com")]
    pub email_address: String,
    #[validate(custom(function = "validate_password"))]
    #[schema(example = "equinox-given-recoup-antique", min_length = 8, max_length = 64)]
    pub password: String,
}

/// Administrative user creation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewUserRendition {
    #[validate(custom(function = "validate_email_address"))]
    #[schema(example = "new@mail.com")]
    pub email_address: String,
    #[validate(custom(function = "validate_password"))]
    #[schema(example = "correct-horse-battery", min_length = 8, max_length = 64)]
    pub password: String,
}

/// Self-service registration request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRendition {
    #[validate(custom(function = "validate_email_address"))]
    #[schema(example = "new@mail.com")]
    pub email_address: String,
    #[validate(custom(function = "validate_password"))]
    #[schema(example = "correct-horse-battery", min_length = 8, max_length = 64)]
    pub password: String,
}

/// User update request. The id must match the one in the path.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserUpdateRendition {
    #[validate(custom(function = "validate_user_id"))]
    #[schema(value_type = i64, example = 5)]
    pub user_id: RawId,
    #[validate(custom(function = "validate_email_address"))]
    #[schema(example = "renamed@mail.com")]
    pub email_address: String,
    /// Omit to keep the current password.
    #[validate(custom(function = "validate_password"))]
    #[schema(min_length = 8, max_length = 64)]
    pub password: Option<String>,
}

/// Registration confirmation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationRendition {
    #[validate(custom(function = "validate_registration_id"))]
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub registration_id: String,
}

fn decode_credentials(
    email_address: String,
    password: String,
) -> Result<Credentials, ValidationError> {
    let mut errors = FieldErrors::new();
    let email_address = errors.check(EmailAddress::parse(email_address));
    let password = errors.check(Password::parse(password));

    match (email_address, password) {
        (Some(email_address), Some(password)) => Ok(Credentials {
            email_address,
            password,
        }),
        _ => Err(errors.into_result().err().unwrap_or_else(|| ValidationError::new("Invalid credentials"))),
    }
}

impl TryFrom<LoginRendition> for Credentials {
    type Error = ValidationError;

    fn try_from(rendition: LoginRendition) -> Result<Self, Self::Error> {
        decode_credentials(rendition.email_address, rendition.password)
    }
}

impl TryFrom<NewUserRendition> for Credentials {
    type Error = ValidationError;

    fn try_from(rendition: NewUserRendition) -> Result<Self, Self::Error> {
        decode_credentials(rendition.email_address, rendition.password)
    }
}

impl TryFrom<RegistrationRendition> for Credentials {
    type Error = ValidationError;

    fn try_from(rendition: RegistrationRendition) -> Result<Self, Self::Error> {
        decode_credentials(rendition.email_address, rendition.password)
    }
}

impl TryFrom<UserUpdateRendition> for UserUpdate {
    type Error = ValidationError;

    fn try_from(rendition: UserUpdateRendition) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let user_id = errors.check(UserId::from_raw(&rendition.user_id));
        let email_address = errors.check(EmailAddress::parse(rendition.email_address));
        let password = match rendition.password {
            Some(raw) => errors.check(Password::parse(raw)).map(Some),
            None => Some(None),
        };

        match (user_id, email_address, password) {
            (Some(user_id), Some(email_address), Some(password)) => Ok(UserUpdate {
                user_id,
                email_address,
                password,
            }),
            _ => Err(errors.into_result().err().unwrap_or_else(|| ValidationError::new("Invalid user update"))),
        }
    }
}

impl TryFrom<ConfirmationRendition> for RegistrationId {
    type Error = ValidationError;

    fn try_from(rendition: ConfirmationRendition) -> Result<Self, Self::Error> {
        RegistrationId::parse(&rendition.registration_id)
    }
}

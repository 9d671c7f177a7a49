//! Domain layer - Validated values, entities and commands.
//!
//! Raw input enters through the smart constructors and renditions in this
//! module; everything past it works with validated types only.

mod email;
mod password;
mod renditions;
mod role;
mod types;
mod user;
mod validation;

pub use email::EmailMessage;
pub use password::{Password, PasswordHash};
pub use renditions::{
    ConfirmationRendition, LoginRendition, NewUserRendition, RegistrationRendition,
    UserUpdateRendition,
};
pub use role::{Role, RoleName};
pub use types::{EmailAddress, NonEmptyString, NonEmptyString50, RawId, RegistrationId, RoleId, UserId};
pub use user::{Credentials, User, UserResponse, UserUpdate};
pub use validation::{FieldErrors, ValidationError};

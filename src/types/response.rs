//! Response bodies shared by the handlers.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{EmailAddress, Role, User, UserId, UserResponse};

/// `{ users: [...] }`
#[derive(Debug, Serialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<UserResponse>,
}

impl From<Vec<User>> for UsersResponse {
    fn from(users: Vec<User>) -> Self {
        Self {
            users: users.into_iter().map(UserResponse::from).collect(),
        }
    }
}

/// `{ roles: [...] }`
#[derive(Debug, Serialize, ToSchema)]
pub struct RolesResponse {
    pub roles: Vec<Role>,
}

impl From<Vec<Role>> for RolesResponse {
    fn from(roles: Vec<Role>) -> Self {
        Self { roles }
    }
}

/// Id of the user a command created, changed or removed
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserIdResponse {
    #[schema(example = 5)]
    pub user_id: i64,
}

impl From<UserId> for UserIdResponse {
    fn from(user_id: UserId) -> Self {
        Self {
            user_id: user_id.value(),
        }
    }
}

/// Address the confirmation mail was sent to
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailAddressResponse {
    #[schema(example = "new@mail.com")]
    pub email_address: String,
}

impl From<EmailAddress> for EmailAddressResponse {
    fn from(email_address: EmailAddress) -> Self {
        Self {
            email_address: email_address.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_response_is_camel_case() {
        let body = serde_json::to_value(UserIdResponse::from(UserId::new(5).unwrap())).unwrap();
        assert_eq!(body, serde_json::json!({ "userId": 5 }));
    }

    #[test]
    fn test_email_address_response_is_camel_case() {
        let email = EmailAddress::parse("new@mail.com").unwrap();
        let body = serde_json::to_value(EmailAddressResponse::from(email)).unwrap();
        assert_eq!(body, serde_json::json!({ "emailAddress": "new@mail.com" }));
    }
}

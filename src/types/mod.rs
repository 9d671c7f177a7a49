//! Shared response types.

mod response;

pub use response::{EmailAddressResponse, RolesResponse, UserIdResponse, UsersResponse};

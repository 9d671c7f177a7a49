//! OpenAPI documentation configuration.
//!
//! Served through Swagger UI at `/swagger-ui`.

use utoipa::OpenApi;

use crate::api::handlers::{auth_handler, registration_handler, role_handler, user_handler};
use crate::domain::{
    ConfirmationRendition, LoginRendition, NewUserRendition, RegistrationRendition, Role,
    RoleName, UserResponse, UserUpdateRendition,
};
use crate::types::{EmailAddressResponse, RolesResponse, UserIdResponse, UsersResponse};

/// OpenAPI documentation for the admin panel
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Admin Panel",
        version = "0.1.0",
        description = "User, role and registration administration backed by PostgreSQL",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::login,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
        registration_handler::register,
        registration_handler::confirm,
        role_handler::list_roles,
        role_handler::get_role,
    ),
    components(
        schemas(
            // Requests
            LoginRendition,
            NewUserRendition,
            UserUpdateRendition,
            RegistrationRendition,
            ConfirmationRendition,
            // Responses
            UserResponse,
            UsersResponse,
            UserIdResponse,
            EmailAddressResponse,
            Role,
            RoleName,
            RolesResponse,
        )
    ),
    tags(
        (name = "Authentication", description = "Credential checks"),
        (name = "Users", description = "User management operations"),
        (name = "Registrations", description = "Self-service sign-up with email confirmation"),
        (name = "Roles", description = "Role lookups")
    )
)]
pub struct ApiDoc;

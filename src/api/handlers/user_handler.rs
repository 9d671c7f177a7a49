//! User management handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Credentials, NewUserRendition, UserId, UserResponse, UserUpdate, UserUpdateRendition};
use crate::errors::{AppError, AppResult};
use crate::types::{UserIdResponse, UsersResponse};

/// Create user routes. Registration routes are merged in by the router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:user_id", get(get_user).put(update_user).delete(delete_user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = UsersResponse)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<UsersResponse>> {
    tracing::info!("Attempting to list users");
    let users = state.user_service.list_users().await?;
    Ok(Json(UsersResponse::from(users)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    tag = "Users",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Invalid user ID"),
        (status = 404, description = "No such resource found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user_id = UserId::parse(&user_id)?;
    tracing::info!(%user_id, "Attempting to get user");

    let user = state.user_service.get_user(user_id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Create a user with the `user` role
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = NewUserRendition,
    responses(
        (status = 200, description = "User created", body = UserIdResponse),
        (status = 400, description = "Validation error or email address in use")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewUserRendition>,
) -> AppResult<Json<UserIdResponse>> {
    let credentials = Credentials::try_from(payload)?;
    tracing::info!(email_address = %credentials.email_address, "Attempting to create user");

    let user_id = state.user_service.create_user(credentials).await?;
    Ok(Json(UserIdResponse::from(user_id)))
}

/// Change a user's email address and, optionally, password
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}",
    tag = "Users",
    params(("user_id" = i64, Path, description = "User ID")),
    request_body = UserUpdateRendition,
    responses(
        (status = 200, description = "User updated", body = UserIdResponse),
        (status = 400, description = "Validation error or mismatched user ID"),
        (status = 404, description = "No such resource found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UserUpdateRendition>,
) -> AppResult<Json<UserIdResponse>> {
    let user_id = UserId::parse(&user_id)?;
    let update = UserUpdate::try_from(payload)?;
    if update.user_id != user_id {
        return Err(AppError::validation(format!(
            "User id {} in the body does not match user id {user_id} in the path",
            update.user_id
        )));
    }
    tracing::info!(%user_id, email_address = %update.email_address, "Attempting to update user");

    let user_id = state.user_service.update_user(update).await?;
    Ok(Json(UserIdResponse::from(user_id)))
}

/// Delete user by ID
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    tag = "Users",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = UserIdResponse),
        (status = 400, description = "Invalid user ID"),
        (status = 404, description = "No such resource found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<UserIdResponse>> {
    let user_id = UserId::parse(&user_id)?;
    tracing::info!(%user_id, "Attempting to delete user");

    let user_id = state.user_service.delete_user(user_id).await?;
    Ok(Json(UserIdResponse::from(user_id)))
}

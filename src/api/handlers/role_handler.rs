//! Role lookup handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::AppState;
use crate::domain::{Role, RoleName};
use crate::errors::AppResult;
use crate::types::RolesResponse;

/// Create role routes
pub fn role_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_roles))
        .route("/:role_name", get(get_role))
}

/// List all roles
#[utoipa::path(
    get,
    path = "/api/v1/roles",
    tag = "Roles",
    responses(
        (status = 200, description = "All roles", body = RolesResponse)
    )
)]
pub async fn list_roles(State(state): State<AppState>) -> AppResult<Json<RolesResponse>> {
    tracing::info!("Attempting to list roles");
    let roles = state.role_service.list_roles().await?;
    Ok(Json(RolesResponse::from(roles)))
}

/// Get role by name
#[utoipa::path(
    get,
    path = "/api/v1/roles/{role_name}",
    tag = "Roles",
    params(("role_name" = String, Path, description = "`user` or `admin`")),
    responses(
        (status = 200, description = "Role found", body = Role),
        (status = 400, description = "Invalid role name"),
        (status = 404, description = "No such resource found")
    )
)]
pub async fn get_role(
    State(state): State<AppState>,
    Path(role_name): Path<String>,
) -> AppResult<Json<Role>> {
    let role_name = RoleName::parse(&role_name)?;
    tracing::info!(%role_name, "Attempting to get role");

    let role = state.role_service.get_role(role_name).await?;
    Ok(Json(role))
}

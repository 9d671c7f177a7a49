//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Credentials, LoginRendition, UserResponse};
use crate::errors::AppResult;

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Check an email address and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRendition,
    responses(
        (status = 200, description = "Credentials match", body = UserResponse),
        (status = 400, description = "Validation error or invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRendition>,
) -> AppResult<Json<UserResponse>> {
    let credentials = Credentials::try_from(payload)?;
    tracing::info!(email_address = %credentials.email_address, "Attempting login");

    let user = state.auth_service.login(credentials).await?;
    Ok(Json(UserResponse::from(user)))
}

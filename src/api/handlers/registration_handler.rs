//! Self-service registration handlers.

use axum::{extract::State, response::Json, routing::post, Router};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{ConfirmationRendition, Credentials, RegistrationId, RegistrationRendition};
use crate::errors::AppResult;
use crate::types::{EmailAddressResponse, UserIdResponse};

/// Create registration routes, nested under `/users/registrations`
pub fn registration_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(register))
        .route("/confirm", post(confirm))
}

/// Start a registration and mail the confirmation link
#[utoipa::path(
    post,
    path = "/api/v1/users/registrations",
    tag = "Registrations",
    request_body = RegistrationRendition,
    responses(
        (status = 200, description = "Confirmation mail sent", body = EmailAddressResponse),
        (status = 400, description = "Validation error or email address in use"),
        (status = 500, description = "Mail could not be rendered or sent")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegistrationRendition>,
) -> AppResult<Json<EmailAddressResponse>> {
    let credentials = Credentials::try_from(payload)?;
    tracing::info!(email_address = %credentials.email_address, "Attempting registration");

    let email_address = state.registration_service.register(credentials).await?;
    Ok(Json(EmailAddressResponse::from(email_address)))
}

/// Confirm a pending registration
#[utoipa::path(
    post,
    path = "/api/v1/users/registrations/confirm",
    tag = "Registrations",
    request_body = ConfirmationRendition,
    responses(
        (status = 200, description = "User created from the registration", body = UserIdResponse),
        (status = 400, description = "Invalid registration ID"),
        (status = 404, description = "No such registration")
    )
)]
pub async fn confirm(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ConfirmationRendition>,
) -> AppResult<Json<UserIdResponse>> {
    let registration_id = RegistrationId::try_from(payload)?;
    tracing::info!(%registration_id, "Attempting registration confirmation");

    let user_id = state.registration_service.confirm(registration_id).await?;
    Ok(Json(UserIdResponse::from(user_id)))
}

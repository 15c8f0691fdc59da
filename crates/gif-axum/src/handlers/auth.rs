//! Registration, confirmation, login and current-user handlers.

use axum::extract::State;
use axum::http::StatusCode;
use gif_core::{AuthTokens, Registration};

use crate::auth::CurrentUser;
use crate::dto::{
    ConfirmRequest, LoginRequest, RegisterRequest, RegisterResponse, StatusMessage, UserResponse,
};
use crate::error::HttpError;
use crate::extract::Json;
use crate::state::AppState;

/// Register with the identity provider and mirror the profile locally.
///
/// Registering an email that already has a profile is not an error.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), HttpError> {
    let outcome = state
        .core
        .auth()
        .register(Registration {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
        })
        .await?;

    let message = if outcome.created {
        "User registered. Please check your email for the confirmation code."
    } else {
        "User already exists."
    };
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            status: "success",
            message,
            user_id: outcome.user.id,
            role: outcome.user.role,
        }),
    ))
}

/// Confirm a sign-up with the emailed code.
pub async fn confirm(
    State(state): State<AppState>,
    Json(req): Json<ConfirmRequest>,
) -> Result<Json<StatusMessage>, HttpError> {
    state.core.auth().confirm(&req.email, &req.code).await?;
    Ok(Json(StatusMessage::success("User confirmed successfully.")))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthTokens>, HttpError> {
    Ok(Json(state.core.auth().login(&req.email, &req.password).await?))
}

/// Profile of the bearer-token holder.
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}

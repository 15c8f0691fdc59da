//! Forgot-password / OTP handlers.

use axum::extract::{Path, State};
use gif_core::OtpStatus;

use crate::dto::{
    ForgotPasswordRequest, OtpResponse, ResetPasswordRequest, StatusMessage, VerifyOtpRequest,
};
use crate::error::HttpError;
use crate::extract::Json;
use crate::state::AppState;

/// Start a reset: the identity provider (or, when it is unreachable, this
/// service) emails a 6-digit code.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<OtpResponse>, HttpError> {
    let outcome = state.core.password_reset().request(&req.email).await?;
    Ok(Json(OtpResponse {
        status: "success",
        message: outcome.message,
        expires_in: Some(outcome.expires_in),
    }))
}

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(req): Json<VerifyOtpRequest>,
) -> Result<Json<OtpResponse>, HttpError> {
    let message = state
        .core
        .password_reset()
        .verify(&req.email, &req.otp)
        .await?;
    Ok(Json(OtpResponse {
        status: "success",
        message: message.to_string(),
        expires_in: None,
    }))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<StatusMessage>, HttpError> {
    state
        .core
        .password_reset()
        .reset(&req.email, &req.otp, &req.new_password, &req.confirm_password)
        .await?;
    Ok(Json(StatusMessage::success(
        "Password has been reset successfully. You can now login with your new password.",
    )))
}

/// Countdown data for the pending code, for the reset form's timer.
pub async fn otp_status(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<OtpStatus>, HttpError> {
    Ok(Json(state.core.password_reset().status(&email).await?))
}

//! Data Transfer Objects (DTOs) for HTTP API contract.
//!
//! Request bodies, query strings and response envelopes. Field names are
//! snake_case to match the existing web and mobile clients.

pub mod auth;
pub mod notifications;
pub mod users;

use serde::Serialize;

pub use auth::{
    ConfirmRequest, ForgotPasswordRequest, LoginRequest, OtpResponse, RegisterRequest,
    RegisterResponse, ResetPasswordRequest, VerifyOtpRequest,
};
pub use notifications::{
    FlaggedActionRequest, MarkReadRequest, NotificationListQuery, NotificationListResponse,
    NotificationSearchQuery,
};
pub use users::{CreateUserRequest, CreateUserResponse, UserListQuery, UserResponse};

/// `{"status": "success", "message": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub status: &'static str,
    pub message: String,
}

impl StatusMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }
}

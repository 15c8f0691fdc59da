//! Auth and password-reset DTOs.

use gif_core::UserRole;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub user_id: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmRequest {
    pub email: String,
    pub code: String,
}

#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl std::fmt::Debug for ResetPasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetPasswordRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Response for the OTP endpoints. `expires_in` is seconds until the code
/// lapses, present only when a code was just issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtpResponse {
    pub status: &'static str,
    pub message: String,
    pub expires_in: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_stay_out_of_debug_output() {
        let req: ResetPasswordRequest = serde_json::from_str(
            r#"{"email":"a@b.io","otp":"123456","new_password":"hunter22!","confirm_password":"hunter22!"}"#,
        )
        .unwrap();
        let printed = format!("{req:?}");
        assert!(!printed.contains("hunter22"));
        assert!(!printed.contains("123456"));

        let login: LoginRequest =
            serde_json::from_str(r#"{"email":"a@b.io","password":"hunter22!"}"#).unwrap();
        assert!(!format!("{login:?}").contains("hunter22"));
    }
}

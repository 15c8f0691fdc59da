//! Per-user settings. GET and PUT share a handler.

use axum::Json;
use serde_json::Value;

use super::placeholder;

pub async fn personal_info() -> Json<Value> {
    placeholder("user/personal-info")
}

pub async fn tutor_customization() -> Json<Value> {
    placeholder("user/tutor-customization")
}

pub async fn preferences() -> Json<Value> {
    placeholder("user/preferences")
}

pub async fn system_settings() -> Json<Value> {
    placeholder("user/system-settings")
}

pub async fn avatar() -> Json<Value> {
    placeholder("user/avatar")
}

pub async fn change_password() -> Json<Value> {
    placeholder("user/change-password")
}

pub async fn two_factor() -> Json<Value> {
    placeholder("user/2fa")
}

pub async fn login_history() -> Json<Value> {
    placeholder("user/login-history")
}

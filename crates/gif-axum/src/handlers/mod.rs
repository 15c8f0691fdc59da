//! HTTP request handlers for the Axum web server.
//!
//! Each submodule contains handlers for a specific API area.
//! Handlers are thin wrappers that delegate to `AppCore`; the student,
//! teacher, class-chat and settings areas return fixed payloads until their
//! backing services exist.

pub mod auth;
pub mod class_chat;
pub mod notifications;
pub mod password;
pub mod settings;
pub mod student;
pub mod teacher;
pub mod users;

use axum::Json;
use serde_json::{Value, json};

/// `{"message": "Success", "endpoint": ..}` placeholder body.
pub(crate) fn placeholder(endpoint: &str) -> Json<Value> {
    Json(json!({ "message": "Success", "endpoint": endpoint }))
}

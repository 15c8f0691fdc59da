//! Class chat shared by students and teachers.

use axum::Json;
use axum::extract::Path;
use serde_json::{Value, json};

use super::placeholder;

pub async fn conversations() -> Json<Value> {
    placeholder("class-chat/conversations")
}

pub async fn messages(Path(chat_id): Path<String>) -> Json<Value> {
    Json(json!({
        "message": "Success",
        "endpoint": "class-chat/conversation/{chat_id}/messages",
        "chat_id": chat_id
    }))
}

pub async fn post_message(Path(chat_id): Path<String>) -> Json<Value> {
    Json(json!({
        "message": "Success",
        "endpoint": "class-chat/conversation/{chat_id}/message",
        "chat_id": chat_id
    }))
}

//! Notification and flagged-content DTOs.

use gif_core::Notification;
use serde::{Deserialize, Serialize};

const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationListQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u64,
    pub status: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSearchQuery {
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u64,
    pub user_id: Option<String>,
}

/// Paginated response for notification listings.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<Notification>,
    pub total: u64,
    pub limit: u32,
    pub offset: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkReadRequest {
    pub notification_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlaggedActionRequest {
    /// `resolve` or `action_taken`.
    pub action: String,
    pub details: Option<String>,
}

//! Notification domain types.
//!
//! Notifications are never hard-deleted through the API; dismissing one is a
//! status change so flagged-content history survives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest accepted notification title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// What produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Chat,
    FlaggedContent,
    System,
}

impl NotificationType {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "chat" => Some(Self::Chat),
            "flagged_content" => Some(Self::FlaggedContent),
            "system" => Some(Self::System),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::FlaggedContent => "flagged_content",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read state of a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    #[default]
    Unread,
    Read,
    Dismissed,
}

impl NotificationStatus {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unread" => Some(Self::Unread),
            "read" => Some(Self::Read),
            "dismissed" => Some(Self::Dismissed),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Dismissed => "dismissed",
        }
    }
}

impl std::fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub status: NotificationStatus,
    pub created_at: DateTime<Utc>,
    pub related_resource_id: Option<String>,
}

/// Data for creating a new notification.
#[derive(Debug, Clone, Deserialize)]
pub struct NewNotification {
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    #[serde(default)]
    pub related_resource_id: Option<String>,
}

/// Filter applied when listing or searching notifications.
///
/// `text` matches case-insensitively against title or message, literally
/// (no pattern syntax).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationFilter {
    pub user_id: Option<String>,
    pub status: Option<NotificationStatus>,
    pub text: Option<String>,
}

/// Offset pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u64,
}

/// One page of notifications plus the total number matching the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPage {
    pub notifications: Vec<Notification>,
    pub total: u64,
}

/// Moderator decision on a flagged-content alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlaggedAction {
    Resolve,
    ActionTaken,
}

impl FlaggedAction {
    pub const ALL: [Self; 2] = [Self::Resolve, Self::ActionTaken];

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "resolve" => Some(Self::Resolve),
            "action_taken" => Some(Self::ActionTaken),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Resolve => "resolve",
            Self::ActionTaken => "action_taken",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_uses_snake_case_on_the_wire() {
        let json = serde_json::to_string(&NotificationType::FlaggedContent).unwrap();
        assert_eq!(json, "\"flagged_content\"");
        assert_eq!(
            NotificationType::parse("flagged_content"),
            Some(NotificationType::FlaggedContent)
        );
    }

    #[test]
    fn status_defaults_to_unread() {
        assert_eq!(NotificationStatus::default(), NotificationStatus::Unread);
        assert_eq!(NotificationStatus::parse("archived"), None);
    }

    #[test]
    fn new_notification_reads_type_field() {
        let json = r#"{"user_id":"u1","title":"t","message":"m","type":"system"}"#;
        let new: NewNotification = serde_json::from_str(json).unwrap();
        assert_eq!(new.kind, NotificationType::System);
        assert!(new.related_resource_id.is_none());
    }

    #[test]
    fn flagged_action_parses_known_values_only() {
        assert_eq!(FlaggedAction::parse("resolve"), Some(FlaggedAction::Resolve));
        assert_eq!(
            FlaggedAction::parse("action_taken"),
            Some(FlaggedAction::ActionTaken)
        );
        assert_eq!(FlaggedAction::parse("delete"), None);
    }
}

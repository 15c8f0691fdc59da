//! Notification repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{
    NewNotification, Notification, NotificationFilter, NotificationPage, NotificationStatus, Page,
};

/// Repository for notification documents.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Insert a new notification with status `unread` and the current time.
    async fn insert(&self, notification: &NewNotification) -> Result<Notification, RepositoryError>;

    /// Fetch one page of notifications matching `filter`, newest first.
    async fn find_page(
        &self,
        filter: &NotificationFilter,
        page: Page,
    ) -> Result<NotificationPage, RepositoryError>;

    /// Look up a notification by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Notification>, RepositoryError>;

    /// Set the status of one notification. Returns `false` if it does not exist.
    async fn set_status(&self, id: &str, status: NotificationStatus)
    -> Result<bool, RepositoryError>;

    /// Mark every listed notification that is not already read as read.
    ///
    /// All ids are validated before anything is written. Returns the number
    /// of documents that changed.
    async fn mark_read(&self, ids: &[String]) -> Result<u64, RepositoryError>;

    /// Find the flagged-content notification attached to an alert.
    async fn find_flagged(&self, alert_id: &str) -> Result<Option<Notification>, RepositoryError>;

    /// Replace the stored status and message of an existing notification.
    async fn update(&self, notification: &Notification) -> Result<(), RepositoryError>;
}

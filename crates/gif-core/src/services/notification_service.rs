//! Notification service - listing, search, read state and flagged-content
//! moderation.

use std::sync::Arc;

use crate::domain::notification::MAX_TITLE_LEN;
use crate::domain::{
    FlaggedAction, NewNotification, Notification, NotificationFilter, NotificationPage,
    NotificationStatus, Page,
};
use crate::ports::{CoreError, NotificationRepository, RepositoryError};

/// Largest page the listing and search endpoints accept.
pub const SEARCH_LIMIT_MAX: u32 = 100;

fn invalid_id(e: RepositoryError) -> CoreError {
    match e {
        RepositoryError::InvalidId(id) => {
            CoreError::Validation(format!("Invalid notification ID format: {id}"))
        }
        other => CoreError::from(other),
    }
}

fn flagged_not_found() -> CoreError {
    CoreError::NotFound("Flagged content notification not found".to_string())
}

pub struct NotificationService {
    repo: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    pub fn new(repo: Arc<dyn NotificationRepository>) -> Self {
        Self { repo }
    }

    fn check_page(page: Page) -> Result<(), CoreError> {
        if !(1..=SEARCH_LIMIT_MAX).contains(&page.limit) {
            return Err(CoreError::Validation(format!(
                "limit must be between 1 and {SEARCH_LIMIT_MAX}"
            )));
        }
        Ok(())
    }

    pub async fn create(&self, new: NewNotification) -> Result<Notification, CoreError> {
        let title_len = new.title.trim().chars().count();
        if title_len == 0 || title_len > MAX_TITLE_LEN {
            return Err(CoreError::Validation(format!(
                "title must be between 1 and {MAX_TITLE_LEN} characters"
            )));
        }
        if new.message.trim().is_empty() {
            return Err(CoreError::Validation("message must not be empty".to_string()));
        }
        if new.user_id.trim().is_empty() {
            return Err(CoreError::Validation("user_id must not be empty".to_string()));
        }
        self.repo.insert(&new).await.map_err(CoreError::from)
    }

    /// Newest-first page of notifications, optionally for one user and status.
    pub async fn list(
        &self,
        user_id: Option<String>,
        status: Option<NotificationStatus>,
        page: Page,
    ) -> Result<NotificationPage, CoreError> {
        Self::check_page(page)?;
        let filter = NotificationFilter {
            user_id,
            status,
            text: None,
        };
        self.repo
            .find_page(&filter, page)
            .await
            .map_err(CoreError::from)
    }

    /// Case-insensitive literal substring search over title and message.
    pub async fn search(
        &self,
        query: &str,
        user_id: Option<String>,
        page: Page,
    ) -> Result<NotificationPage, CoreError> {
        Self::check_page(page)?;
        if query.is_empty() {
            return Err(CoreError::Validation("query must not be empty".to_string()));
        }
        let filter = NotificationFilter {
            user_id,
            status: None,
            text: Some(query.to_string()),
        };
        self.repo
            .find_page(&filter, page)
            .await
            .map_err(CoreError::from)
    }

    /// Mark several notifications read. Returns how many changed.
    pub async fn mark_read_many(&self, ids: &[String]) -> Result<u64, CoreError> {
        if ids.is_empty() {
            return Err(CoreError::Validation(
                "notification_ids must contain at least one id".to_string(),
            ));
        }
        let modified = self.repo.mark_read(ids).await.map_err(invalid_id)?;
        if modified == 0 {
            return Err(CoreError::NotFound(
                "No matching notifications found or already marked as read".to_string(),
            ));
        }
        Ok(modified)
    }

    pub async fn mark_read(&self, id: &str) -> Result<(), CoreError> {
        self.set_status(id, NotificationStatus::Read).await
    }

    /// Soft delete: the document stays with status `dismissed`.
    pub async fn dismiss(&self, id: &str) -> Result<(), CoreError> {
        self.set_status(id, NotificationStatus::Dismissed).await
    }

    async fn set_status(&self, id: &str, status: NotificationStatus) -> Result<(), CoreError> {
        let found = self.repo.set_status(id, status).await.map_err(|e| match e {
            RepositoryError::InvalidId(_) => {
                CoreError::Validation("Invalid notification ID format".to_string())
            }
            other => CoreError::from(other),
        })?;
        if !found {
            return Err(CoreError::NotFound("Notification not found".to_string()));
        }
        Ok(())
    }

    /// Dismiss the flagged-content notification attached to `alert_id`.
    pub async fn ignore_flagged(&self, alert_id: &str) -> Result<(), CoreError> {
        let mut notification = self
            .repo
            .find_flagged(alert_id)
            .await?
            .ok_or_else(flagged_not_found)?;
        notification.status = NotificationStatus::Dismissed;
        self.repo.update(&notification).await?;
        Ok(())
    }

    /// Record a moderator decision on a flagged-content alert.
    ///
    /// The notification becomes `read` and its message gains an
    /// `" | Action: ..."` suffix.
    pub async fn act_on_flagged(
        &self,
        alert_id: &str,
        action: FlaggedAction,
        details: Option<&str>,
    ) -> Result<Notification, CoreError> {
        let mut notification = self
            .repo
            .find_flagged(alert_id)
            .await?
            .ok_or_else(flagged_not_found)?;

        notification.status = NotificationStatus::Read;
        match details.filter(|d| !d.is_empty()) {
            Some(details) => notification
                .message
                .push_str(&format!(" | Action: {} - {details}", action.as_str())),
            None => notification
                .message
                .push_str(&format!(" | Action: {}", action.as_str())),
        }
        self.repo.update(&notification).await?;
        Ok(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NotificationType;
    use crate::testing::InMemoryNotificationRepository;

    fn service() -> NotificationService {
        NotificationService::new(Arc::new(InMemoryNotificationRepository::default()))
    }

    fn new(user: &str, title: &str, message: &str, kind: NotificationType) -> NewNotification {
        NewNotification {
            user_id: user.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            kind,
            related_resource_id: None,
        }
    }

    const PAGE: Page = Page {
        limit: 20,
        offset: 0,
    };

    #[tokio::test]
    async fn list_is_newest_first_and_filtered() {
        let svc = service();
        svc.create(new("u1", "first", "m", NotificationType::System))
            .await
            .unwrap();
        let second = svc
            .create(new("u1", "second", "m", NotificationType::Chat))
            .await
            .unwrap();
        svc.create(new("u2", "other", "m", NotificationType::Chat))
            .await
            .unwrap();

        let page = svc.list(Some("u1".to_string()), None, PAGE).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.notifications[0].id, second.id);

        svc.mark_read(&second.id).await.unwrap();
        let unread = svc
            .list(None, Some(NotificationStatus::Unread), PAGE)
            .await
            .unwrap();
        assert_eq!(unread.total, 2);
    }

    #[tokio::test]
    async fn list_rejects_bad_limits() {
        let svc = service();
        for limit in [0, 101] {
            let err = svc
                .list(None, None, Page { limit, offset: 0 })
                .await
                .unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn search_matches_metacharacters_literally() {
        let svc = service();
        svc.create(new("u1", "Price (USD)", "m", NotificationType::System))
            .await
            .unwrap();
        svc.create(new("u1", "Price USD", "m", NotificationType::System))
            .await
            .unwrap();

        let page = svc.search("(usd)", None, PAGE).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.notifications[0].title, "Price (USD)");

        assert!(matches!(
            svc.search("", None, PAGE).await,
            Err(CoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn mark_read_many_counts_only_changes() {
        let svc = service();
        let a = svc
            .create(new("u1", "a", "m", NotificationType::System))
            .await
            .unwrap();
        let b = svc
            .create(new("u1", "b", "m", NotificationType::System))
            .await
            .unwrap();

        svc.mark_read(&a.id).await.unwrap();
        let n = svc
            .mark_read_many(&[a.id.clone(), b.id.clone()])
            .await
            .unwrap();
        assert_eq!(n, 1);

        let err = svc.mark_read_many(&[a.id, b.id]).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn mark_read_many_rejects_malformed_ids_before_writing() {
        let svc = service();
        let a = svc
            .create(new("u1", "a", "m", NotificationType::System))
            .await
            .unwrap();
        let err = svc
            .mark_read_many(&[a.id.clone(), "bogus".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref m) if m.contains("bogus")));

        let unread = svc
            .list(None, Some(NotificationStatus::Unread), PAGE)
            .await
            .unwrap();
        assert_eq!(unread.total, 1);
    }

    #[tokio::test]
    async fn dismiss_reports_missing_and_malformed_ids() {
        let svc = service();
        assert!(matches!(
            svc.dismiss("xyz").await,
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            svc.dismiss("0123456789abcdef01234567").await,
            Err(CoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn flagged_action_appends_details() {
        let svc = service();
        let mut flagged = new("u1", "Flag", "Bad word", NotificationType::FlaggedContent);
        flagged.related_resource_id = Some("alert-7".to_string());
        svc.create(flagged).await.unwrap();

        let updated = svc
            .act_on_flagged("alert-7", FlaggedAction::ActionTaken, Some("warned"))
            .await
            .unwrap();
        assert_eq!(updated.status, NotificationStatus::Read);
        assert_eq!(updated.message, "Bad word | Action: action_taken - warned");

        assert!(matches!(
            svc.act_on_flagged("alert-8", FlaggedAction::Resolve, None)
                .await,
            Err(CoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn ignore_only_targets_flagged_content() {
        let svc = service();
        let mut chat = new("u1", "Chat", "hi", NotificationType::Chat);
        chat.related_resource_id = Some("alert-1".to_string());
        svc.create(chat).await.unwrap();

        assert!(matches!(
            svc.ignore_flagged("alert-1").await,
            Err(CoreError::NotFound(_))
        ));

        let mut flagged = new("u1", "Flag", "x", NotificationType::FlaggedContent);
        flagged.related_resource_id = Some("alert-1".to_string());
        let created = svc.create(flagged).await.unwrap();
        svc.ignore_flagged("alert-1").await.unwrap();

        let dismissed = svc
            .list(None, Some(NotificationStatus::Dismissed), PAGE)
            .await
            .unwrap();
        assert_eq!(dismissed.notifications[0].id, created.id);
    }
}

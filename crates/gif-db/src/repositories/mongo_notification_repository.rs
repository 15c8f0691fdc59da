//! MongoDB implementation of the `NotificationRepository` trait.

use async_trait::async_trait;
use bson::{Document, doc};
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::{Collection, Database};

use gif_core::{
    NewNotification, Notification, NotificationFilter, NotificationPage, NotificationRepository,
    NotificationStatus, NotificationType, Page, RepositoryError,
};

use super::NOTIFICATIONS;
use super::documents::{NotificationDocument, parse_id, storage};

/// Translate a domain filter into a query document.
///
/// Text search is a case-insensitive regex over title and message with the
/// user's input escaped, so `(` or `.` match themselves.
fn to_query(filter: &NotificationFilter) -> Document {
    let mut query = Document::new();
    if let Some(user_id) = &filter.user_id {
        query.insert("user_id", user_id.as_str());
    }
    if let Some(status) = filter.status {
        query.insert("status", status.as_str());
    }
    if let Some(text) = &filter.text {
        let pattern = regex::escape(text);
        query.insert(
            "$or",
            vec![
                doc! { "title": { "$regex": pattern.as_str(), "$options": "i" } },
                doc! { "message": { "$regex": pattern.as_str(), "$options": "i" } },
            ],
        );
    }
    query
}

pub struct MongoNotificationRepository {
    notifications: Collection<NotificationDocument>,
}

impl MongoNotificationRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            notifications: db.collection(NOTIFICATIONS),
        }
    }
}

#[async_trait]
impl NotificationRepository for MongoNotificationRepository {
    async fn insert(&self, notification: &NewNotification) -> Result<Notification, RepositoryError> {
        let mut document = NotificationDocument::new(notification, Utc::now());
        let result = self
            .notifications
            .insert_one(&document)
            .await
            .map_err(|e| storage(&e))?;
        document.id = result.inserted_id.as_object_id();
        Notification::try_from(document)
    }

    async fn find_page(
        &self,
        filter: &NotificationFilter,
        page: Page,
    ) -> Result<NotificationPage, RepositoryError> {
        let query = to_query(filter);
        let total = self
            .notifications
            .count_documents(query.clone())
            .await
            .map_err(|e| storage(&e))?;

        let documents: Vec<NotificationDocument> = self
            .notifications
            .find(query)
            .sort(doc! { "created_at": -1, "_id": -1 })
            .skip(page.offset)
            .limit(i64::from(page.limit))
            .await
            .map_err(|e| storage(&e))?
            .try_collect()
            .await
            .map_err(|e| storage(&e))?;

        Ok(NotificationPage {
            notifications: documents
                .into_iter()
                .map(Notification::try_from)
                .collect::<Result<_, _>>()?,
            total,
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Notification>, RepositoryError> {
        let oid = parse_id(id)?;
        self.notifications
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|e| storage(&e))?
            .map(Notification::try_from)
            .transpose()
    }

    async fn set_status(
        &self,
        id: &str,
        status: NotificationStatus,
    ) -> Result<bool, RepositoryError> {
        let oid = parse_id(id)?;
        let result = self
            .notifications
            .update_one(
                doc! { "_id": oid },
                doc! { "$set": { "status": status.as_str() } },
            )
            .await
            .map_err(|e| storage(&e))?;
        Ok(result.matched_count > 0)
    }

    async fn mark_read(&self, ids: &[String]) -> Result<u64, RepositoryError> {
        let oids = ids
            .iter()
            .map(String::as_str)
            .map(parse_id)
            .collect::<Result<Vec<_>, _>>()?;
        let result = self
            .notifications
            .update_many(
                doc! {
                    "_id": { "$in": oids },
                    "status": { "$ne": NotificationStatus::Read.as_str() },
                },
                doc! { "$set": { "status": NotificationStatus::Read.as_str() } },
            )
            .await
            .map_err(|e| storage(&e))?;
        Ok(result.modified_count)
    }

    async fn find_flagged(&self, alert_id: &str) -> Result<Option<Notification>, RepositoryError> {
        self.notifications
            .find_one(doc! {
                "type": NotificationType::FlaggedContent.as_str(),
                "related_resource_id": alert_id,
            })
            .await
            .map_err(|e| storage(&e))?
            .map(Notification::try_from)
            .transpose()
    }

    async fn update(&self, notification: &Notification) -> Result<(), RepositoryError> {
        let oid = parse_id(&notification.id)?;
        let result = self
            .notifications
            .update_one(
                doc! { "_id": oid },
                doc! { "$set": {
                    "status": notification.status.as_str(),
                    "message": notification.message.as_str(),
                } },
            )
            .await
            .map_err(|e| storage(&e))?;
        if result.matched_count == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Notification {}",
                notification.id
            )));
        }
        Ok(())
    }
}

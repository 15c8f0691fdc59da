//! Notification and flagged-content handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use gif_core::{FlaggedAction, NewNotification, Notification, NotificationStatus, Page};

use crate::dto::{
    FlaggedActionRequest, MarkReadRequest, NotificationListQuery, NotificationListResponse,
    NotificationSearchQuery, StatusMessage,
};
use crate::error::HttpError;
use crate::extract::{Json, Query};
use crate::state::AppState;

fn parse_status(raw: Option<&str>) -> Result<Option<NotificationStatus>, HttpError> {
    raw.filter(|s| !s.is_empty())
        .map(|s| {
            NotificationStatus::parse(s).ok_or_else(|| {
                HttpError::BadRequest(
                    "Invalid status. Must be one of: unread, read, dismissed".to_string(),
                )
            })
        })
        .transpose()
}

fn parse_action(raw: &str) -> Result<FlaggedAction, HttpError> {
    FlaggedAction::parse(raw).ok_or_else(|| {
        let valid: Vec<&str> = FlaggedAction::ALL.iter().map(FlaggedAction::as_str).collect();
        HttpError::BadRequest(format!(
            "Invalid action. Must be one of: {}",
            valid.join(", ")
        ))
    })
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewNotification>,
) -> Result<(StatusCode, Json<Notification>), HttpError> {
    let notification = state.core.notifications().create(req).await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

/// Newest-first page of notifications.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<NotificationListQuery>,
) -> Result<Json<NotificationListResponse>, HttpError> {
    let status = parse_status(query.status.as_deref())?;
    let page = Page {
        limit: query.limit,
        offset: query.offset,
    };
    let found = state
        .core
        .notifications()
        .list(query.user_id.filter(|u| !u.is_empty()), status, page)
        .await?;
    Ok(Json(NotificationListResponse {
        notifications: found.notifications,
        total: found.total,
        limit: page.limit,
        offset: page.offset,
    }))
}

/// Case-insensitive search over title and message.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<NotificationSearchQuery>,
) -> Result<Json<NotificationListResponse>, HttpError> {
    let page = Page {
        limit: query.limit,
        offset: query.offset,
    };
    let found = state
        .core
        .notifications()
        .search(&query.query, query.user_id.filter(|u| !u.is_empty()), page)
        .await?;
    Ok(Json(NotificationListResponse {
        notifications: found.notifications,
        total: found.total,
        limit: page.limit,
        offset: page.offset,
    }))
}

pub async fn mark_read_many(
    State(state): State<AppState>,
    Json(req): Json<MarkReadRequest>,
) -> Result<Json<StatusMessage>, HttpError> {
    let modified = state
        .core
        .notifications()
        .mark_read_many(&req.notification_ids)
        .await?;
    Ok(Json(StatusMessage::success(format!(
        "Successfully marked {modified} notification(s) as read"
    ))))
}

pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusMessage>, HttpError> {
    state.core.notifications().mark_read(&id).await?;
    Ok(Json(StatusMessage::success(
        "Notification marked as read successfully",
    )))
}

/// Soft delete.
pub async fn dismiss(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusMessage>, HttpError> {
    state.core.notifications().dismiss(&id).await?;
    Ok(Json(StatusMessage::success(
        "Notification dismissed successfully",
    )))
}

pub async fn ignore_flagged(
    State(state): State<AppState>,
    Path(alert_id): Path<String>,
) -> Result<Json<StatusMessage>, HttpError> {
    state.core.notifications().ignore_flagged(&alert_id).await?;
    Ok(Json(StatusMessage::success(format!(
        "Flagged content alert {alert_id} has been ignored"
    ))))
}

pub async fn act_on_flagged(
    State(state): State<AppState>,
    Path(alert_id): Path<String>,
    Json(req): Json<FlaggedActionRequest>,
) -> Result<Json<StatusMessage>, HttpError> {
    let action = parse_action(&req.action)?;
    let details = req.details.as_deref().filter(|d| !d.is_empty());
    state
        .core
        .notifications()
        .act_on_flagged(&alert_id, action, details)
        .await?;

    let mut message = format!(
        "Flagged content alert {alert_id} marked as {}",
        action.as_str()
    );
    if let Some(details) = details {
        message.push_str(": ");
        message.push_str(details);
    }
    Ok(Json(StatusMessage::success(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_parses_known_values_only() {
        assert_eq!(parse_status(None).unwrap(), None);
        assert_eq!(parse_status(Some("")).unwrap(), None);
        assert_eq!(
            parse_status(Some("read")).unwrap(),
            Some(NotificationStatus::Read)
        );
        assert!(parse_status(Some("archived")).is_err());
    }

    #[test]
    fn unknown_action_lists_valid_ones() {
        let err = parse_action("delete").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Bad request: Invalid action. Must be one of: resolve, action_taken"
        );
    }
}

//! Stored document shapes and their mapping to domain types.

use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gif_core::{
    NewNotification, NewOtp, NewUser, Notification, NotificationStatus, NotificationType,
    OtpRecord, OtpSource, RepositoryError, User, UserRole,
};

/// Error code MongoDB reports for a unique-index violation.
pub const DUPLICATE_KEY: i32 = 11000;

pub fn parse_id(id: &str) -> Result<ObjectId, RepositoryError> {
    ObjectId::parse_str(id).map_err(|_| RepositoryError::InvalidId(id.to_string()))
}

pub fn storage(e: &mongodb::error::Error) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}

pub fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};
    matches!(
        e.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY
    )
}

fn missing_id() -> RepositoryError {
    RepositoryError::Serialization("stored document has no _id".to_string())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl UserDocument {
    pub fn new(user: &NewUser, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            created_at: now,
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = RepositoryError;

    fn try_from(doc: UserDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: doc.id.ok_or_else(missing_id)?.to_hex(),
            email: doc.email,
            full_name: doc.full_name,
            role: doc.role,
            created_at: doc.created_at,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotificationDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    #[serde(default)]
    pub status: NotificationStatus,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub related_resource_id: Option<String>,
}

impl NotificationDocument {
    pub fn new(n: &NewNotification, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            user_id: n.user_id.clone(),
            title: n.title.clone(),
            message: n.message.clone(),
            kind: n.kind,
            status: NotificationStatus::Unread,
            created_at: now,
            related_resource_id: n.related_resource_id.clone(),
        }
    }
}

impl TryFrom<NotificationDocument> for Notification {
    type Error = RepositoryError;

    fn try_from(doc: NotificationDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: doc.id.ok_or_else(missing_id)?.to_hex(),
            user_id: doc.user_id,
            title: doc.title,
            message: doc.message,
            kind: doc.kind,
            status: doc.status,
            created_at: doc.created_at,
            related_resource_id: doc.related_resource_id,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Provider,
    Local,
}

/// An OTP record.
///
/// `otp` holds the code we generated (local source only); `provider_code`
/// holds the code a user entered for a provider-issued OTP once verified.
#[derive(Debug, Serialize, Deserialize)]
pub struct OtpDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub source: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_code: Option<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub attempts: i32,
    #[serde(default)]
    pub verified: bool,
}

impl From<&NewOtp> for OtpDocument {
    fn from(otp: &NewOtp) -> Self {
        let (source, code, provider_code) = match &otp.source {
            OtpSource::Provider { entered_code } => {
                (SourceKind::Provider, None, entered_code.clone())
            }
            OtpSource::Local { code } => (SourceKind::Local, Some(code.clone()), None),
        };
        Self {
            id: None,
            email: otp.email.clone(),
            source,
            otp: code,
            provider_code,
            created_at: otp.created_at,
            expires_at: otp.expires_at,
            attempts: 0,
            verified: false,
        }
    }
}

impl TryFrom<OtpDocument> for OtpRecord {
    type Error = RepositoryError;

    fn try_from(doc: OtpDocument) -> Result<Self, Self::Error> {
        let source = match doc.source {
            SourceKind::Provider => OtpSource::Provider {
                entered_code: doc.provider_code,
            },
            SourceKind::Local => OtpSource::Local {
                code: doc.otp.ok_or_else(|| {
                    RepositoryError::Serialization("local OTP record has no code".to_string())
                })?,
            },
        };
        Ok(Self {
            id: doc.id.ok_or_else(missing_id)?.to_hex(),
            email: doc.email,
            source,
            created_at: doc.created_at,
            expires_at: doc.expires_at,
            attempts: u32::try_from(doc.attempts).unwrap_or(0),
            verified: doc.verified,
        })
    }
}

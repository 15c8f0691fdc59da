//! In-memory repositories and fake ports.
//!
//! Enabled for this crate's tests and, through the `test-utils` feature, for
//! adapter crates that need an `AppCore` without MongoDB, Cognito or SendGrid.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    AuthTokens, CodeDelivery, IdentityClaims, NewNotification, NewOtp, NewUser, Notification,
    NotificationFilter, NotificationPage, NotificationStatus, NotificationType, OtpRecord,
    OtpSource, Page, SignUpOutcome, User,
};
use crate::ports::{
    AuthError, IdentityError, IdentityProvider, MailError, Mailer, NotificationRepository,
    OtpRepository, OutgoingMail, Repos, RepositoryError, TokenVerifier, UserRepository,
};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Hands out ids shaped like MongoDB object ids (24 lowercase hex chars).
#[derive(Debug, Default)]
struct IdGen(AtomicU64);

impl IdGen {
    fn next(&self) -> String {
        format!("{:024x}", self.0.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

fn check_id(id: &str) -> Result<(), RepositoryError> {
    if id.len() == 24 && id.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(RepositoryError::InvalidId(id.to_string()))
    }
}

/// Build a `Repos` container backed entirely by memory.
pub fn in_memory_repos() -> Repos {
    Repos::new(
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(InMemoryNotificationRepository::default()),
        Arc::new(InMemoryOtpRepository::default()),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Repositories
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    ids: IdGen,
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let mut users = lock(&self.users);
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::AlreadyExists(user.email.clone()));
        }
        let stored = User {
            id: self.ids.next(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role,
            created_at: Utc::now(),
        };
        users.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(lock(&self.users).iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        check_id(id)?;
        Ok(lock(&self.users).iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self, limit: u32) -> Result<Vec<User>, RepositoryError> {
        Ok(lock(&self.users)
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryNotificationRepository {
    ids: IdGen,
    notifications: Mutex<Vec<Notification>>,
}

fn matches_filter(n: &Notification, filter: &NotificationFilter) -> bool {
    if filter.user_id.as_ref().is_some_and(|u| *u != n.user_id) {
        return false;
    }
    if filter.status.is_some_and(|s| s != n.status) {
        return false;
    }
    filter.text.as_ref().is_none_or(|text| {
        let needle = text.to_lowercase();
        n.title.to_lowercase().contains(&needle) || n.message.to_lowercase().contains(&needle)
    })
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn insert(&self, new: &NewNotification) -> Result<Notification, RepositoryError> {
        let stored = Notification {
            id: self.ids.next(),
            user_id: new.user_id.clone(),
            title: new.title.clone(),
            message: new.message.clone(),
            kind: new.kind,
            status: NotificationStatus::Unread,
            created_at: Utc::now(),
            related_resource_id: new.related_resource_id.clone(),
        };
        lock(&self.notifications).push(stored.clone());
        Ok(stored)
    }

    async fn find_page(
        &self,
        filter: &NotificationFilter,
        page: Page,
    ) -> Result<NotificationPage, RepositoryError> {
        let mut matching: Vec<Notification> = lock(&self.notifications)
            .iter()
            .rev()
            .filter(|n| matches_filter(n, filter))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let notifications = matching
            .into_iter()
            .skip(usize::try_from(page.offset).unwrap_or(usize::MAX))
            .take(page.limit as usize)
            .collect();
        Ok(NotificationPage {
            notifications,
            total,
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Notification>, RepositoryError> {
        check_id(id)?;
        Ok(lock(&self.notifications)
            .iter()
            .find(|n| n.id == id)
            .cloned())
    }

    async fn set_status(
        &self,
        id: &str,
        status: NotificationStatus,
    ) -> Result<bool, RepositoryError> {
        check_id(id)?;
        let mut all = lock(&self.notifications);
        match all.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_read(&self, ids: &[String]) -> Result<u64, RepositoryError> {
        for id in ids {
            check_id(id)?;
        }
        let mut changed = 0;
        for n in lock(&self.notifications).iter_mut() {
            if ids.contains(&n.id) && n.status != NotificationStatus::Read {
                n.status = NotificationStatus::Read;
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn find_flagged(&self, alert_id: &str) -> Result<Option<Notification>, RepositoryError> {
        Ok(lock(&self.notifications)
            .iter()
            .find(|n| {
                n.kind == NotificationType::FlaggedContent
                    && n.related_resource_id.as_deref() == Some(alert_id)
            })
            .cloned())
    }

    async fn update(&self, notification: &Notification) -> Result<(), RepositoryError> {
        let mut all = lock(&self.notifications);
        let existing = all
            .iter_mut()
            .find(|n| n.id == notification.id)
            .ok_or_else(|| RepositoryError::NotFound(notification.id.clone()))?;
        existing.status = notification.status;
        existing.message.clone_from(&notification.message);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryOtpRepository {
    ids: IdGen,
    records: Mutex<Vec<OtpRecord>>,
}

impl InMemoryOtpRepository {
    pub fn is_empty(&self) -> bool {
        lock(&self.records).is_empty()
    }

    fn with_record<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut OtpRecord) -> R,
    ) -> Result<R, RepositoryError> {
        let mut records = lock(&self.records);
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        Ok(f(record))
    }
}

#[async_trait]
impl OtpRepository for InMemoryOtpRepository {
    async fn replace(&self, otp: &NewOtp) -> Result<OtpRecord, RepositoryError> {
        let record = OtpRecord {
            id: self.ids.next(),
            email: otp.email.clone(),
            source: otp.source.clone(),
            created_at: otp.created_at,
            expires_at: otp.expires_at,
            attempts: 0,
            verified: false,
        };
        let mut records = lock(&self.records);
        records.retain(|r| r.email != otp.email);
        records.push(record.clone());
        Ok(record)
    }

    async fn find(&self, email: &str, verified: bool) -> Result<Option<OtpRecord>, RepositoryError> {
        Ok(lock(&self.records)
            .iter()
            .find(|r| r.email == email && r.verified == verified)
            .cloned())
    }

    async fn consume_attempt(&self, id: &str, limit: u32) -> Result<Option<u32>, RepositoryError> {
        let mut records = lock(&self.records);
        Ok(records
            .iter_mut()
            .find(|r| r.id == id && r.attempts < limit)
            .map(|r| {
                r.attempts += 1;
                r.attempts
            }))
    }

    async fn mark_verified(
        &self,
        id: &str,
        entered_code: Option<&str>,
    ) -> Result<(), RepositoryError> {
        self.with_record(id, |r| {
            r.verified = true;
            if let (OtpSource::Provider { entered_code: slot }, Some(code)) =
                (&mut r.source, entered_code)
            {
                *slot = Some(code.to_string());
            }
        })
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        lock(&self.records).retain(|r| r.id != id);
        Ok(())
    }

    async fn delete_for_email(&self, email: &str) -> Result<u64, RepositoryError> {
        let mut records = lock(&self.records);
        let before = records.len();
        records.retain(|r| r.email != email);
        Ok((before - records.len()) as u64)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let mut records = lock(&self.records);
        let before = records.len();
        records.retain(|r| r.expires_at >= now);
        Ok((before - records.len()) as u64)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// External services
// ─────────────────────────────────────────────────────────────────────────────

/// Identity provider that accepts everything unless told otherwise.
#[derive(Debug, Default)]
pub struct FakeIdentityProvider {
    sign_up_error: Option<IdentityError>,
    login_error: Option<IdentityError>,
    forgot_password: Option<Result<CodeDelivery, IdentityError>>,
    confirm_forgot_error: Option<IdentityError>,
    resets: Mutex<Vec<(String, String)>>,
}

impl FakeIdentityProvider {
    #[must_use]
    pub fn with_sign_up_error(mut self, e: IdentityError) -> Self {
        self.sign_up_error = Some(e);
        self
    }

    #[must_use]
    pub fn with_login_error(mut self, e: IdentityError) -> Self {
        self.login_error = Some(e);
        self
    }

    #[must_use]
    pub fn with_forgot_password(mut self, result: Result<CodeDelivery, IdentityError>) -> Self {
        self.forgot_password = Some(result);
        self
    }

    #[must_use]
    pub fn with_confirm_forgot_error(mut self, e: IdentityError) -> Self {
        self.confirm_forgot_error = Some(e);
        self
    }

    /// `(email, code)` pairs passed to `confirm_forgot_password`.
    pub fn resets(&self) -> Vec<(String, String)> {
        lock(&self.resets).clone()
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        _name: &str,
    ) -> Result<SignUpOutcome, IdentityError> {
        match &self.sign_up_error {
            Some(e) => Err(e.clone()),
            None => Ok(SignUpOutcome {
                user_sub: format!("sub-{email}"),
                confirmed: false,
            }),
        }
    }

    async fn confirm_sign_up(&self, _email: &str, code: &str) -> Result<(), IdentityError> {
        if code == "000000" {
            return Err(IdentityError::CodeMismatch(
                "Invalid verification code provided, please try again.".to_string(),
            ));
        }
        Ok(())
    }

    async fn login(&self, email: &str, _password: &str) -> Result<AuthTokens, IdentityError> {
        match &self.login_error {
            Some(e) => Err(e.clone()),
            None => Ok(AuthTokens {
                access_token: format!("access-{email}"),
                id_token: format!("id-{email}"),
                refresh_token: Some("refresh".to_string()),
                expires_in: 3600,
                token_type: "Bearer".to_string(),
            }),
        }
    }

    async fn forgot_password(&self, _email: &str) -> Result<CodeDelivery, IdentityError> {
        self.forgot_password.clone().unwrap_or_else(|| {
            Ok(CodeDelivery {
                medium: "EMAIL".to_string(),
                destination: "x***@x***".to_string(),
            })
        })
    }

    async fn confirm_forgot_password(
        &self,
        email: &str,
        code: &str,
        _new_password: &str,
    ) -> Result<(), IdentityError> {
        if let Some(e) = &self.confirm_forgot_error {
            return Err(e.clone());
        }
        lock(&self.resets).push((email.to_string(), code.to_string()));
        Ok(())
    }
}

/// Token verifier backed by a fixed token -> claims table.
#[derive(Debug, Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, IdentityClaims>,
}

impl StaticTokenVerifier {
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, claims: IdentityClaims) -> Self {
        self.tokens.insert(token.into(), claims);
        self
    }

    /// Claims for a token carrying only `email`.
    pub fn claims_for(email: &str) -> IdentityClaims {
        IdentityClaims {
            sub: format!("sub-{email}"),
            email: Some(email.to_string()),
            name: None,
            username: None,
            token_use: Some("id".to_string()),
            exp: i64::MAX,
            iat: None,
        }
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<IdentityClaims, AuthError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| AuthError::InvalidToken("unknown token".to_string()))
    }
}

/// Mailer that keeps delivered messages in memory.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    failure: Option<MailError>,
    sent: Mutex<Vec<OutgoingMail>>,
}

impl RecordingMailer {
    /// A mailer whose every send fails with `error`.
    pub fn failing(error: MailError) -> Self {
        Self {
            failure: Some(error),
            sent: Mutex::default(),
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        lock(&self.sent).clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        if let Some(e) = &self.failure {
            return Err(e.clone());
        }
        lock(&self.sent).push(mail.clone());
        Ok(())
    }
}

//! OTP repository trait definition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::RepositoryError;
use crate::domain::{NewOtp, OtpRecord};

/// Repository for short-lived password-reset OTP records.
///
/// Implementations keep at most one record per email: `replace` swaps out any
/// previous record for the same address in a single step.
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Store a fresh record for the email, replacing any existing one.
    async fn replace(&self, otp: &NewOtp) -> Result<OtpRecord, RepositoryError>;

    /// Find the record for `email` with the given verified flag.
    async fn find(&self, email: &str, verified: bool) -> Result<Option<OtpRecord>, RepositoryError>;

    /// Atomically use up one verification attempt if fewer than `limit` have
    /// been used, returning the new count.
    ///
    /// `None` means the record is spent or no longer exists.
    async fn consume_attempt(&self, id: &str, limit: u32) -> Result<Option<u32>, RepositoryError>;

    /// Flag a record as verified, remembering the code a user entered for a
    /// provider-issued OTP.
    async fn mark_verified(
        &self,
        id: &str,
        entered_code: Option<&str>,
    ) -> Result<(), RepositoryError>;

    /// Delete one record.
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;

    /// Delete every record for an email.
    async fn delete_for_email(&self, email: &str) -> Result<u64, RepositoryError>;

    /// Delete every record that expired before `now`.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError>;
}

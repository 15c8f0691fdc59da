//! One-time password records for the password-reset flow.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Number of digits in every OTP, whichever side issued it.
pub const OTP_LENGTH: usize = 6;

/// Lifetime of an OTP record.
pub const OTP_EXPIRY_MINUTES: i64 = 10;

/// Verification attempts allowed before a locally issued OTP is discarded.
pub const MAX_ATTEMPTS: u32 = 3;

/// Who issued the code the user received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum OtpSource {
    /// The identity provider emailed its own code; we never see it until the
    /// user types it in.
    Provider {
        /// Code the user entered, remembered once verified so the reset step
        /// can hand it back to the provider.
        entered_code: Option<String>,
    },
    /// Fallback: we generated and mailed the code ourselves.
    Local { code: String },
}

impl OtpSource {
    #[must_use]
    pub const fn is_provider(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }
}

/// A persisted OTP record. At most one exists per email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpRecord {
    pub id: String,
    pub email: String,
    pub source: OtpSource,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub attempts: u32,
    pub verified: bool,
}

impl OtpRecord {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    #[must_use]
    pub const fn remaining_attempts(&self) -> u32 {
        MAX_ATTEMPTS.saturating_sub(self.attempts)
    }

    /// Whole seconds until expiry, clamped at zero.
    #[must_use]
    pub fn seconds_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

/// Data for issuing a new OTP record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOtp {
    pub email: String,
    pub source: OtpSource,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl NewOtp {
    /// A fresh record expiring [`OTP_EXPIRY_MINUTES`] after `now`.
    #[must_use]
    pub fn issue(email: impl Into<String>, source: OtpSource, now: DateTime<Utc>) -> Self {
        Self {
            email: email.into(),
            source,
            created_at: now,
            expires_at: now + Duration::minutes(OTP_EXPIRY_MINUTES),
        }
    }

    #[must_use]
    pub const fn expires_in_seconds() -> i64 {
        OTP_EXPIRY_MINUTES * 60
    }
}

/// Snapshot returned by the OTP status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OtpStatus {
    Active {
        expires_in_seconds: i64,
        attempts: u32,
        remaining_attempts: u32,
    },
    NotFound {
        message: String,
    },
}

//! Forgot-password flow.
//!
//! 1. `request` asks the identity provider to email a reset code and records
//!    a provider-sourced OTP. When the provider is unreachable, a local code is
//!    generated, stored and mailed instead.
//! 2. `verify` checks the code the user typed. Provider codes cannot be checked
//!    locally, so they are remembered for step 3; local codes are compared and
//!    count against [`MAX_ATTEMPTS`].
//! 3. `reset` hands the remembered code and the new password to the provider.
//!
//! Codes are never logged.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::domain::{MAX_ATTEMPTS, NewOtp, OtpRecord, OtpSource, OtpStatus};
use crate::ports::{
    CoreError, IdentityError, IdentityProvider, Mailer, OtpRepository, OutgoingMail,
};
use crate::utils::{mask_email, normalize_email, validate_otp, validate_password};

const GENERIC_SENT: &str = "If an account with this email exists, an OTP has been sent.";
const VERIFIED: &str = "OTP verified successfully. You can now reset your password.";

/// Response data for a reset request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetRequestOutcome {
    pub message: String,
    pub expires_in: i64,
}

impl ResetRequestOutcome {
    fn sent_to(email: &str) -> Self {
        Self {
            message: format!(
                "OTP has been sent to {}. Please check your email (including spam folder).",
                mask_email(email)
            ),
            expires_in: NewOtp::expires_in_seconds(),
        }
    }

    fn generic() -> Self {
        Self {
            message: GENERIC_SENT.to_string(),
            expires_in: NewOtp::expires_in_seconds(),
        }
    }
}

/// Six random decimal digits, leading zeros kept.
fn generate_code() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

pub struct PasswordResetService {
    identity: Arc<dyn IdentityProvider>,
    otps: Arc<dyn OtpRepository>,
    mailer: Arc<dyn Mailer>,
    app_name: String,
}

impl PasswordResetService {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        otps: Arc<dyn OtpRepository>,
        mailer: Arc<dyn Mailer>,
        app_name: impl Into<String>,
    ) -> Self {
        Self {
            identity,
            otps,
            mailer,
            app_name: app_name.into(),
        }
    }

    /// Start a password reset for `email`.
    ///
    /// Never reveals whether the account exists: unknown users and
    /// unclassified provider errors get the same generic success.
    pub async fn request(&self, email: &str) -> Result<ResetRequestOutcome, CoreError> {
        let email = normalize_email(email)?;

        match self.identity.forgot_password(&email).await {
            Ok(delivery) => {
                if !delivery.is_email() {
                    return Err(CoreError::Validation(format!(
                        "Email delivery failed. Delivery medium: {}",
                        delivery.medium
                    )));
                }
                self.otps
                    .replace(&NewOtp::issue(
                        &email,
                        OtpSource::Provider { entered_code: None },
                        Utc::now(),
                    ))
                    .await?;
                info!(target: "gif.otp", email = %mask_email(&email), "Provider reset code sent");
                Ok(ResetRequestOutcome::sent_to(&email))
            }
            Err(IdentityError::LimitExceeded(_)) => Err(CoreError::RateLimited(
                "Too many password reset attempts. Please wait 15 minutes before trying again."
                    .to_string(),
            )),
            Err(IdentityError::InvalidParameter(_)) => Err(CoreError::Validation(
                "Invalid email format or identity provider configuration issue.".to_string(),
            )),
            Err(IdentityError::Unavailable(reason)) => {
                warn!(target: "gif.otp", %reason, "Identity provider unavailable, issuing local OTP");
                self.issue_local(&email).await
            }
            Err(e) => {
                debug!(target: "gif.otp", error = %e, "Reset request answered generically");
                Ok(ResetRequestOutcome::generic())
            }
        }
    }

    async fn issue_local(&self, email: &str) -> Result<ResetRequestOutcome, CoreError> {
        let code = generate_code();
        let new_otp = NewOtp::issue(email, OtpSource::Local { code: code.clone() }, Utc::now());
        self.otps.replace(&new_otp).await.map_err(|e| {
            warn!(target: "gif.otp", error = %e, "Failed to store fallback OTP");
            CoreError::Internal(
                "Email delivery service is temporarily unavailable. Please try again later."
                    .to_string(),
            )
        })?;

        let mail = OutgoingMail {
            to: email.to_string(),
            subject: format!("Password Reset OTP - {}", self.app_name),
            html: format!(
                "<h2>Password Reset Request</h2>\
                 <p>Your OTP for password reset is: <strong>{code}</strong></p>\
                 <p>This OTP will expire in 10 minutes.</p>\
                 <p>If you didn't request this, please ignore this email.</p>"
            ),
        };
        if let Err(e) = self.mailer.send(&mail).await {
            warn!(target: "gif.otp", error = %e, email = %mask_email(email), "Fallback OTP mail not sent");
        }
        Ok(ResetRequestOutcome::sent_to(email))
    }

    /// Check a code the user typed. Returns the success message.
    pub async fn verify(&self, email: &str, otp: &str) -> Result<&'static str, CoreError> {
        let email = normalize_email(email)?;
        let otp = validate_otp(otp)?;

        let record = self.otps.find(&email, false).await?.ok_or_else(|| {
            CoreError::Validation(
                "No active OTP found for this email. Please request a new OTP.".to_string(),
            )
        })?;

        if record.is_expired(Utc::now()) {
            self.otps.delete(&record.id).await?;
            return Err(CoreError::Validation("OTP has expired".to_string()));
        }

        match &record.source {
            OtpSource::Provider { .. } => {
                self.otps.mark_verified(&record.id, Some(otp)).await?;
            }
            OtpSource::Local { code } => {
                // The store enforces the cap; `record.attempts` may be stale.
                let Some(attempts) = self.otps.consume_attempt(&record.id, MAX_ATTEMPTS).await?
                else {
                    self.otps.delete(&record.id).await?;
                    return Err(CoreError::Validation(
                        "Maximum verification attempts exceeded".to_string(),
                    ));
                };
                if code != otp {
                    let remaining = MAX_ATTEMPTS.saturating_sub(attempts);
                    return Err(CoreError::Validation(format!(
                        "Invalid OTP. {remaining} attempts remaining"
                    )));
                }
                self.otps.mark_verified(&record.id, None).await?;
            }
        }
        info!(target: "gif.otp", email = %mask_email(&email), "OTP verified");
        Ok(VERIFIED)
    }

    /// Complete the reset with the verified code.
    pub async fn reset(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), CoreError> {
        let email = normalize_email(email)?;
        let otp = validate_otp(otp)?;
        validate_password(new_password)?;
        if new_password != confirm_password {
            return Err(CoreError::Validation("Passwords do not match".to_string()));
        }

        let record = self.otps.find(&email, true).await?.ok_or_else(|| {
            CoreError::Validation(
                "No verified OTP found for this email. Please verify OTP first.".to_string(),
            )
        })?;
        if record.is_expired(Utc::now()) {
            self.otps.delete_for_email(&email).await?;
            return Err(CoreError::Validation(
                "OTP has expired. Please request a new OTP.".to_string(),
            ));
        }

        match &record.source {
            OtpSource::Provider {
                entered_code: Some(code),
            } => {
                if code != otp {
                    return Err(CoreError::Validation(
                        "Invalid OTP. Please check the code and try again.".to_string(),
                    ));
                }
                self.identity
                    .confirm_forgot_password(&email, code, new_password)
                    .await
                    .map_err(reset_error)?;
            }
            OtpSource::Provider { entered_code: None } => {
                return Err(CoreError::Validation(
                    "No verified OTP found for this email. Please verify OTP first.".to_string(),
                ));
            }
            OtpSource::Local { .. } => {
                warn!(target: "gif.otp", "Password reset requested with a locally issued OTP");
                return Err(CoreError::NotImplemented(
                    "Password reset is temporarily unavailable. Please contact support or try again later."
                        .to_string(),
                ));
            }
        }

        self.otps.delete_for_email(&email).await?;
        info!(target: "gif.otp", email = %mask_email(&email), "Password reset completed");
        Ok(())
    }

    /// Countdown information for the active (unverified) OTP of `email`.
    pub async fn status(&self, email: &str) -> Result<OtpStatus, CoreError> {
        let email = email.trim().to_lowercase();
        let now = Utc::now();
        let not_found = || OtpStatus::NotFound {
            message: "No active OTP found for this email".to_string(),
        };

        let Some(record) = self.otps.find(&email, false).await? else {
            return Ok(not_found());
        };
        if record.is_expired(now) {
            self.otps.delete(&record.id).await?;
            return Ok(not_found());
        }
        Ok(active_status(&record, now))
    }

    /// Remove every expired record. Returns how many were deleted.
    pub async fn cleanup_expired(&self, now: DateTime<Utc>) -> Result<u64, CoreError> {
        let removed = self.otps.delete_expired(now).await?;
        if removed > 0 {
            debug!(target: "gif.otp", removed, "Purged expired OTP records");
        }
        Ok(removed)
    }
}

fn active_status(record: &OtpRecord, now: DateTime<Utc>) -> OtpStatus {
    OtpStatus::Active {
        expires_in_seconds: record.seconds_remaining(now),
        attempts: record.attempts,
        remaining_attempts: record.remaining_attempts(),
    }
}

fn reset_error(e: IdentityError) -> CoreError {
    warn!(target: "gif.otp", error = %e, "Provider rejected password reset");
    match e {
        IdentityError::CodeMismatch(_) => CoreError::Validation(
            "Invalid OTP. Please check the code and try again.".to_string(),
        ),
        IdentityError::ExpiredCode(_) => {
            CoreError::Validation("OTP has expired. Please request a new OTP.".to_string())
        }
        IdentityError::InvalidPassword(m) => {
            CoreError::Validation(format!("Password does not meet requirements: {m}"))
        }
        IdentityError::LimitExceeded(_) => CoreError::RateLimited(
            "Too many password reset attempts. Please try again later.".to_string(),
        ),
        IdentityError::Unavailable(_) => CoreError::ExternalService(
            "Password reset service is temporarily unavailable".to_string(),
        ),
        other => CoreError::Validation(format!("Failed to reset password: {}", other.message())),
    }
}

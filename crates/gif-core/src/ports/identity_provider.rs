//! Identity provider port.
//!
//! Credential storage, sign-in and password-reset codes belong to an external
//! managed service. This port names the handful of operations the API uses.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{AuthTokens, CodeDelivery, SignUpOutcome};

/// Classified identity-provider failures.
///
/// Adapters translate provider-specific error codes into these variants so
/// services can decide what to reveal to callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("User does not exist: {0}")]
    UserNotFound(String),

    #[error("User already exists: {0}")]
    UserExists(String),

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("User is not confirmed: {0}")]
    UserNotConfirmed(String),

    #[error("Invalid verification code: {0}")]
    CodeMismatch(String),

    #[error("Verification code expired: {0}")]
    ExpiredCode(String),

    #[error("Attempt limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Password does not meet policy: {0}")]
    InvalidPassword(String),

    /// Credentials, pool configuration or network prevented the call.
    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),

    #[error("{code}: {message}")]
    Other { code: String, message: String },
}

impl IdentityError {
    /// Human-readable message without the variant prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::UserNotFound(m)
            | Self::UserExists(m)
            | Self::NotAuthorized(m)
            | Self::UserNotConfirmed(m)
            | Self::CodeMismatch(m)
            | Self::ExpiredCode(m)
            | Self::LimitExceeded(m)
            | Self::InvalidParameter(m)
            | Self::InvalidPassword(m)
            | Self::Unavailable(m) => m,
            Self::Other { message, .. } => message,
        }
    }
}

/// Operations delegated to the identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register credentials. The provider emails a confirmation code.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<SignUpOutcome, IdentityError>;

    /// Confirm a registration with the emailed code.
    async fn confirm_sign_up(&self, email: &str, code: &str) -> Result<(), IdentityError>;

    /// Password sign-in.
    async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, IdentityError>;

    /// Start a password reset; the provider emails its own code.
    async fn forgot_password(&self, email: &str) -> Result<CodeDelivery, IdentityError>;

    /// Finish a password reset with the provider-issued code.
    async fn confirm_forgot_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), IdentityError>;
}

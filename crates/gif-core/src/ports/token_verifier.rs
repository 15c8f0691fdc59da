//! Bearer token verification port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::IdentityClaims;

/// Reasons a bearer token is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has expired")]
    Expired,

    #[error("No signing key matches kid {0}")]
    UnknownKey(String),

    #[error("Signing keys unavailable: {0}")]
    KeySetUnavailable(String),

    #[error("Email not found in token")]
    MissingEmail,
}

/// Verifies a bearer token and returns its claims.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<IdentityClaims, AuthError>;
}

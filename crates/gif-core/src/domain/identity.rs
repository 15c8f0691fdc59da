//! Value types exchanged with the identity provider.

use serde::{Deserialize, Serialize};

/// Tokens issued on a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub id_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: i64,
    pub token_type: String,
}

/// Outcome of a provider sign-up call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutcome {
    /// Provider-side subject identifier.
    pub user_sub: String,
    pub confirmed: bool,
}

/// Where the provider sent a verification code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeDelivery {
    /// `EMAIL` or `SMS`.
    pub medium: String,
    /// Masked destination as reported by the provider.
    pub destination: String,
}

impl CodeDelivery {
    #[must_use]
    pub fn is_email(&self) -> bool {
        self.medium.eq_ignore_ascii_case("EMAIL")
    }
}

/// Verified claims extracted from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub token_use: Option<String>,
    pub exp: i64,
    pub iat: Option<i64>,
}

//! Bearer-token extractors.
//!
//! `BearerClaims` verifies the `Authorization: Bearer <jwt>` header against
//! the configured `TokenVerifier`. `CurrentUser` additionally resolves the
//! user document for the token's `email` claim. Rejections are 401 responses
//! carrying `WWW-Authenticate: Bearer` (404 when the user document is gone).

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use gif_core::{AuthError, IdentityClaims, User};

use crate::error::HttpError;
use crate::state::AppState;

/// Claims of a verified bearer token.
#[derive(Debug, Clone)]
pub struct BearerClaims(pub IdentityClaims);

/// The user behind a verified bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for BearerClaims {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers) else {
            tracing::warn!(
                target: "gif.auth",
                path = %parts.uri.path(),
                "Unauthorized API request - missing or malformed bearer token"
            );
            return Err(AuthError::MissingToken.into());
        };

        match state.tokens.verify(token).await {
            Ok(claims) => Ok(Self(claims)),
            Err(e) => {
                tracing::warn!(
                    target: "gif.auth",
                    path = %parts.uri.path(),
                    error = %e,
                    "Unauthorized API request - token rejected"
                );
                Err(e.into())
            }
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let BearerClaims(claims) = BearerClaims::from_request_parts(parts, state).await?;
        let user = state.core.auth().current_user(&claims).await?;
        Ok(Self(user))
    }
}

/// Token from an `Authorization: Bearer <token>` header. The scheme is
/// matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        map
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
    }

    #[test]
    fn rejects_other_schemes_and_blanks() {
        assert_eq!(bearer_token(&headers("Basic dXNlcg==")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}

//! Bearer token verification against the user pool's JWKS.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use tokio::sync::RwLock;
use tracing::{debug, info};

use gif_core::{AuthError, IdentityClaims, TokenVerifier};

use crate::config::CognitoConfig;
use crate::error::CognitoError;

/// Verifies RS256 tokens issued by a Cognito user pool.
///
/// The key set is fetched lazily on first use and kept until a token names a
/// `kid` the cached set lacks, at which point it is fetched once more. Fetches
/// are at least `refresh_interval` apart, so tokens with made-up `kid`s cannot
/// drive traffic to the key endpoint.
pub struct JwksVerifier {
    http: reqwest::Client,
    jwks_url: String,
    validation: Validation,
    refresh_interval: Duration,
    cache: RwLock<KeyCache>,
}

#[derive(Default)]
struct KeyCache {
    keys: Option<JwkSet>,
    last_fetch: Option<Instant>,
}

impl KeyCache {
    fn find(&self, kid: &str) -> Option<Jwk> {
        self.keys.as_ref().and_then(|set| set.find(kid)).cloned()
    }
}

impl JwksVerifier {
    pub fn new(config: &CognitoConfig) -> Result<Self, CognitoError> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[config.client_id()]);
        validation.set_issuer(&[config.issuer()]);
        validation.set_required_spec_claims(&["exp", "aud", "iss"]);

        Ok(Self {
            http: config.http_client()?,
            jwks_url: config.jwks_url(),
            validation,
            refresh_interval: config.jwks_refresh_interval,
            cache: RwLock::new(KeyCache::default()),
        })
    }

    async fn fetch_keys(&self) -> Result<JwkSet, AuthError> {
        let unavailable = |e: reqwest::Error| AuthError::KeySetUnavailable(e.to_string());
        let set: JwkSet = self
            .http
            .get(&self.jwks_url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(unavailable)?
            .json()
            .await
            .map_err(unavailable)?;
        info!(target: "gif.identity", keys = set.keys.len(), "Fetched signing keys");
        Ok(set)
    }

    /// Find the key for `kid`, refreshing the cached set at most once per
    /// refresh interval.
    async fn key_for(&self, kid: &str) -> Result<Jwk, AuthError> {
        if let Some(jwk) = self.cache.read().await.find(kid) {
            return Ok(jwk);
        }

        // Concurrent misses queue here and share whatever the first one fetched.
        let mut cache = self.cache.write().await;
        if let Some(jwk) = cache.find(kid) {
            return Ok(jwk);
        }
        if cache
            .last_fetch
            .is_some_and(|at| at.elapsed() < self.refresh_interval)
        {
            debug!(target: "gif.identity", kid, "Unknown signing key, refresh on cooldown");
            return Err(AuthError::UnknownKey(kid.to_string()));
        }

        debug!(target: "gif.identity", kid, "Signing key not cached, refreshing key set");
        cache.last_fetch = Some(Instant::now());
        cache.keys = Some(self.fetch_keys().await?);
        cache
            .find(kid)
            .ok_or_else(|| AuthError::UnknownKey(kid.to_string()))
    }
}

#[async_trait]
impl TokenVerifier for JwksVerifier {
    async fn verify(&self, token: &str) -> Result<IdentityClaims, AuthError> {
        let header = decode_header(token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidToken("token header has no kid".to_string()))?;

        let jwk = self.key_for(&kid).await?;
        let key = DecodingKey::from_jwk(&jwk).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        decode::<IdentityClaims>(token, &key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }
}

//! Public configuration for the Cognito adapters.

use std::time::Duration;

/// Configuration shared by `CognitoClient` and `JwksVerifier`.
///
/// Endpoints default to the public AWS URLs derived from the region and pool;
/// the `with_*_url` overrides exist for local stand-ins.
#[derive(Debug, Clone)]
pub struct CognitoConfig {
    pub(crate) region: String,
    pub(crate) user_pool_id: String,
    pub(crate) client_id: String,
    pub(crate) endpoint: Option<String>,
    pub(crate) jwks_url: Option<String>,
    pub(crate) timeout: Duration,
    pub(crate) user_agent: String,
    pub(crate) jwks_refresh_interval: Duration,
}

impl CognitoConfig {
    #[must_use]
    pub fn new(
        region: impl Into<String>,
        user_pool_id: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            user_pool_id: user_pool_id.into(),
            client_id: client_id.into(),
            endpoint: None,
            jwks_url: None,
            timeout: Duration::from_secs(10),
            user_agent: concat!("gif-identity/", env!("CARGO_PKG_VERSION")).to_string(),
            jwks_refresh_interval: Duration::from_secs(60),
        }
    }

    /// Override the Identity Provider API endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    /// Override where the signing keys are fetched from.
    #[must_use]
    pub fn with_jwks_url(mut self, url: impl Into<String>) -> Self {
        self.jwks_url = Some(url.into());
        self
    }

    /// Set the request timeout. Defaults to 10 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Minimum time between two signing-key fetches. Defaults to 60 seconds.
    #[must_use]
    pub const fn with_jwks_refresh_interval(mut self, interval: Duration) -> Self {
        self.jwks_refresh_interval = interval;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://cognito-idp.{}.amazonaws.com/", self.region))
    }

    /// Expected `iss` claim: the user pool URL.
    pub fn issuer(&self) -> String {
        format!(
            "https://cognito-idp.{}.amazonaws.com/{}",
            self.region, self.user_pool_id
        )
    }

    pub fn jwks_url(&self) -> String {
        self.jwks_url
            .clone()
            .unwrap_or_else(|| format!("{}/.well-known/jwks.json", self.issuer()))
    }

    pub(crate) fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
    }
}

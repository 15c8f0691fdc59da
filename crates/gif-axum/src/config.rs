//! Server configuration loaded from environment variables.

use thiserror::Error;
use tracing::info;

const DEFAULT_DATABASE: &str = "maitech";
const DEFAULT_APP_NAME: &str = "MaiTech";

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

impl CorsConfig {
    /// Parse a comma separated origin list. `*` or an empty list allows all.
    pub fn parse(value: &str) -> Self {
        let origins: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            Self::AllowAll
        } else {
            Self::AllowOrigins(origins)
        }
    }
}

/// Identity provider settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CognitoSettings {
    pub region: String,
    pub user_pool_id: String,
    pub client_id: String,
}

/// Outbound mail settings. Absent means mail is disabled.
#[derive(Clone, PartialEq, Eq)]
pub struct MailSettings {
    pub api_key: String,
    pub from: String,
}

impl std::fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailSettings")
            .field("api_key", &"<redacted>")
            .field("from", &self.from)
            .finish()
    }
}

/// Required variables were missing or unparsable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    pub mongodb_url: String,
    pub mongodb_database: String,
    pub cognito: CognitoSettings,
    pub mail: Option<MailSettings>,
    pub cors: CorsConfig,
    /// Product name used in outbound mail.
    pub app_name: String,
}

impl ServerConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Every missing required key is
    /// reported in a single error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut missing = Vec::new();
        let mut require = |key: &'static str| {
            var(key).unwrap_or_else(|| {
                missing.push(key);
                String::new()
            })
        };
        let mongodb_url = require("MONGODB_URL");
        let region = require("COGNITO_REGION");
        let user_pool_id = require("COGNITO_USER_POOL_ID");
        let client_id = require("COGNITO_CLIENT_ID");
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let mail = match (var("SENDGRID_API_KEY"), var("MAIL_FROM")) {
            (Some(api_key), Some(from)) => Some(MailSettings { api_key, from }),
            _ => {
                info!(target: "gif.config", "SENDGRID_API_KEY or MAIL_FROM not set, outbound mail disabled");
                None
            }
        };

        Ok(Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            mongodb_url,
            mongodb_database: var("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            cognito: CognitoSettings {
                region,
                user_pool_id,
                client_id,
            },
            mail,
            cors: var("CORS_ALLOWED_ORIGINS").map_or_else(CorsConfig::default, |v| CorsConfig::parse(&v)),
            app_name: var("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
        })
    }

    /// Set the listen address.
    #[must_use]
    pub fn with_address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

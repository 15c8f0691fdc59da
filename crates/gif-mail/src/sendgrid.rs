//! SendGrid v3 HTTP API mailer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use tracing::{info, warn};

use gif_core::{MailError, Mailer, OutgoingMail};

/// Configuration for [`SendGridMailer`].
///
/// ```
/// use gif_mail::SendGridConfig;
///
/// let config = SendGridConfig::new("SG.key", "noreply@maitech.example");
/// assert_eq!(config.from(), "noreply@maitech.example");
/// ```
#[derive(Clone)]
pub struct SendGridConfig {
    api_key: String,
    from: String,
    base_url: String,
    timeout: Duration,
}

// Keeps the API key out of logs.
impl std::fmt::Debug for SendGridConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendGridConfig")
            .field("from", &self.from)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl SendGridConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            from: from.into(),
            base_url: "https://api.sendgrid.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Override the API host. Defaults to `https://api.sendgrid.com`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from(&self) -> &str {
        &self.from
    }
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 1],
}

pub struct SendGridMailer {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl SendGridMailer {
    pub fn new(config: SendGridConfig) -> Result<Self, MailError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MailError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: format!("{}/v3/mail/send", config.base_url.trim_end_matches('/')),
            api_key: config.api_key,
            from: config.from,
        })
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let request = SendRequest {
            personalizations: [Personalization {
                to: [Address { email: &mail.to }],
            }],
            from: Address { email: &self.from },
            subject: &mail.subject,
            content: [Content {
                kind: "text/html",
                value: &mail.html,
            }],
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            info!(target: "gif.mail", status = status.as_u16(), subject = %mail.subject, "Mail accepted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!(target: "gif.mail", status = status.as_u16(), "Mail API rejected message");
        Err(MailError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

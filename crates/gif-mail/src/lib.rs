#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

mod sendgrid;

use async_trait::async_trait;
use gif_core::{MailError, Mailer, OutgoingMail};
use tracing::warn;

pub use sendgrid::{SendGridConfig, SendGridMailer};

/// Mailer used when outbound mail is not configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        warn!(target: "gif.mail", subject = %mail.subject, "Outbound mail disabled, message dropped");
        Err(MailError::Disabled)
    }
}

// Silence unused dev-dependency warnings
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use wiremock as _;

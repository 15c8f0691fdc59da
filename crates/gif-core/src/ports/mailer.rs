//! Outbound mail port.

use async_trait::async_trait;
use thiserror::Error;

/// An HTML email to a single recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MailError {
    /// No mail credentials are configured.
    #[error("Outbound mail is not configured")]
    Disabled,

    /// The mail API answered with a non-success status.
    #[error("Mail API rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Mail transport error: {0}")]
    Transport(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

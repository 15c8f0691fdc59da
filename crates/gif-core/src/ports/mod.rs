//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `mongodb`/`bson` types in any signature; ids travel as hex strings
//! - No HTTP or AWS wire types; the identity provider speaks domain types
//! - Repository traits are CRUD-focused; flow logic lives in services

pub mod identity_provider;
pub mod mailer;
pub mod notification_repository;
pub mod otp_repository;
pub mod token_verifier;
pub mod user_repository;

use std::sync::Arc;
use thiserror::Error;

pub use identity_provider::{IdentityError, IdentityProvider};
pub use mailer::{MailError, Mailer, OutgoingMail};
pub use notification_repository::NotificationRepository;
pub use otp_repository::OtpRepository;
pub use token_verifier::{AuthError, TokenVerifier};
pub use user_repository::UserRepository;

/// Container for all repository trait objects.
///
/// This struct provides a consistent way to wire repositories across adapters
/// without coupling them to concrete implementations. It lives in `gif-core`
/// so that `AppCore` can accept it without depending on `gif-db`.
#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn UserRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub otps: Arc<dyn OtpRepository>,
}

impl Repos {
    pub fn new(
        users: Arc<dyn UserRepository>,
        notifications: Arc<dyn NotificationRepository>,
        otps: Arc<dyn OtpRepository>,
    ) -> Self {
        Self {
            users,
            notifications,
            otps,
        }
    }
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., driver
/// errors) and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same unique key already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// The identifier is not in the store's id format.
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// Storage backend error (connection, command failure, ...).
    #[error("Storage error: {0}")]
    Storage(String),

    /// A stored document could not be mapped to a domain type.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (HTTP status codes, exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Bearer token rejected.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Validation error (invalid input).
    #[error("{0}")]
    Validation(String),

    /// Requested entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Credentials were rejected.
    #[error("{0}")]
    Unauthorized(String),

    /// The caller is being throttled.
    #[error("{0}")]
    RateLimited(String),

    /// The operation cannot be completed in the current mode.
    #[error("{0}")]
    NotImplemented(String),

    /// External service error.
    #[error("{0}")]
    ExternalService(String),

    /// Internal error (unexpected condition).
    #[error("{0}")]
    Internal(String),
}

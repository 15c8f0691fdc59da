//! User repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{NewUser, User};

/// Repository for user documents.
///
/// # Design Rules
///
/// - Email is unique; `insert` reports a duplicate as `AlreadyExists`
/// - Ids are opaque strings; a malformed id is `InvalidId`, not `NotFound`
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the stored document.
    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError>;

    /// Look up a user by (lower-cased) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Look up a user by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepositoryError>;

    /// List up to `limit` users in insertion order.
    async fn list(&self, limit: u32) -> Result<Vec<User>, RepositoryError>;
}

//! Composition utilities for building `AppCore` with MongoDB backends.
//!
//! Construction only; no domain logic lives here.

use std::sync::Arc;

use mongodb::Database;

use gif_core::Repos;
use gif_core::ports::{IdentityProvider, Mailer};
use gif_core::services::AppCore;

use crate::repositories::{MongoNotificationRepository, MongoOtpRepository, MongoUserRepository};

/// Factory for creating repository instances with MongoDB backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Build all MongoDB repositories from a database handle.
    ///
    /// `Database` is a cheap handle over the driver's shared connection pool,
    /// so every repository gets its own clone.
    pub fn build_repos(db: &Database) -> Repos {
        Repos::new(
            Arc::new(MongoUserRepository::new(db)),
            Arc::new(MongoNotificationRepository::new(db)),
            Arc::new(MongoOtpRepository::new(db)),
        )
    }

    /// Build a complete `AppCore` from a database handle and the external
    /// service adapters.
    ///
    /// ```ignore
    /// let db = setup_database(&url, "maitech").await?;
    /// let core = CoreFactory::build_app_core(&db, identity, mailer, "MaiTech");
    /// ```
    pub fn build_app_core(
        db: &Database,
        identity: Arc<dyn IdentityProvider>,
        mailer: Arc<dyn Mailer>,
        app_name: &str,
    ) -> AppCore {
        AppCore::new(Self::build_repos(db), identity, mailer, app_name)
    }
}

//! `AppCore` - the primary application facade.
//!
//! This is the composition root for core services. Adapters receive an
//! `AppCore` instance and use it to access all functionality.

use std::sync::Arc;

use crate::ports::{IdentityProvider, Mailer, Repos};

use super::{AuthService, NotificationService, PasswordResetService, UserService};

/// The core application facade.
///
/// Constructed at the adapter's composition root with concrete repositories,
/// an identity provider and a mailer.
///
/// # Example
///
/// ```ignore
/// let repos = CoreFactory::build_repos(&db);
/// let core = AppCore::new(repos, Arc::new(cognito), Arc::new(mailer), "MaiTech");
///
/// let user = core.users().get(&id).await?;
/// ```
pub struct AppCore {
    users: UserService,
    notifications: NotificationService,
    auth: AuthService,
    password_reset: PasswordResetService,
}

impl AppCore {
    pub fn new(
        repos: Repos,
        identity: Arc<dyn IdentityProvider>,
        mailer: Arc<dyn Mailer>,
        app_name: impl Into<String>,
    ) -> Self {
        Self {
            users: UserService::new(Arc::clone(&repos.users)),
            notifications: NotificationService::new(repos.notifications),
            auth: AuthService::new(Arc::clone(&identity), repos.users),
            password_reset: PasswordResetService::new(identity, repos.otps, mailer, app_name),
        }
    }

    /// Access the user service.
    pub const fn users(&self) -> &UserService {
        &self.users
    }

    /// Access the notification service.
    pub const fn notifications(&self) -> &NotificationService {
        &self.notifications
    }

    /// Access registration, login and current-user lookups.
    pub const fn auth(&self) -> &AuthService {
        &self.auth
    }

    /// Access the forgot-password / OTP flow.
    pub const fn password_reset(&self) -> &PasswordResetService {
        &self.password_reset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::testing::{FakeIdentityProvider, RecordingMailer, in_memory_repos};

    #[tokio::test]
    async fn services_share_the_same_user_store() {
        let core = AppCore::new(
            in_memory_repos(),
            Arc::new(FakeIdentityProvider::default()),
            Arc::new(RecordingMailer::default()),
            "MaiTech",
        );

        let created = core
            .users()
            .create("Ada", "ada@school.org", UserRole::Admin)
            .await
            .unwrap();

        let outcome = core
            .auth()
            .register(crate::services::Registration {
                name: "Ada".to_string(),
                email: "ada@school.org".to_string(),
                password: "correct-horse".to_string(),
                role: UserRole::Customer,
            })
            .await
            .unwrap();

        assert!(!outcome.created);
        assert_eq!(outcome.user.id, created.id);
    }
}

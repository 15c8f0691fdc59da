//! Registration, confirmation, login and current-user resolution.
//!
//! Credentials never touch the database: the identity provider owns them and
//! the `users` collection only mirrors profile data.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{AuthTokens, IdentityClaims, NewUser, User, UserRole};
use crate::ports::{AuthError, CoreError, IdentityError, IdentityProvider, RepositoryError, UserRepository};
use crate::utils::{normalize_email, validate_confirmation_code, validate_name, validate_password};

const BAD_CREDENTIALS: &str = "Incorrect email or password";

/// Registration request after deserialization.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Result of a registration call.
///
/// `created` is `false` when a user document for the email already existed;
/// registration is idempotent on the database side.
#[derive(Debug, Clone)]
pub struct RegisterOutcome {
    pub user: User,
    pub created: bool,
}

pub struct AuthService {
    identity: Arc<dyn IdentityProvider>,
    users: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(identity: Arc<dyn IdentityProvider>, users: Arc<dyn UserRepository>) -> Self {
        Self { identity, users }
    }

    /// Sign up with the identity provider, then mirror the user locally.
    pub async fn register(&self, registration: Registration) -> Result<RegisterOutcome, CoreError> {
        let name = validate_name(&registration.name)?;
        let email = normalize_email(&registration.email)?;
        validate_password(&registration.password)?;

        self.identity
            .sign_up(&email, &registration.password, &name)
            .await
            .map_err(|e| {
                warn!(target: "gif.auth", error = %e, "Sign-up rejected by identity provider");
                CoreError::Validation(format!("Sign-up failed: {}", e.message()))
            })?;

        if let Some(user) = self.users.find_by_email(&email).await? {
            return Ok(RegisterOutcome {
                user,
                created: false,
            });
        }

        let new_user = NewUser {
            email,
            full_name: Some(name),
            role: registration.role,
        };
        match self.users.insert(&new_user).await {
            Ok(user) => {
                info!(target: "gif.auth", user_id = %user.id, role = %user.role, "Registered user");
                Ok(RegisterOutcome {
                    user,
                    created: true,
                })
            }
            // Lost a race with a concurrent registration for the same email.
            Err(RepositoryError::AlreadyExists(_)) => self
                .users
                .find_by_email(&new_user.email)
                .await?
                .map(|user| RegisterOutcome {
                    user,
                    created: false,
                })
                .ok_or_else(|| CoreError::Internal("Failed to create user in database".to_string())),
            Err(e) => Err(CoreError::Internal(format!(
                "Failed to create user in database: {e}"
            ))),
        }
    }

    /// Confirm a registration with the code the provider emailed.
    pub async fn confirm(&self, email: &str, code: &str) -> Result<(), CoreError> {
        let email = normalize_email(email)?;
        let code = validate_confirmation_code(code)?;
        self.identity
            .confirm_sign_up(&email, code)
            .await
            .map_err(|e| CoreError::Validation(format!("Confirmation failed: {}", e.message())))
    }

    /// Password login. Unknown, unconfirmed and wrong-password accounts all
    /// produce the same message.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, CoreError> {
        let email = normalize_email(email)?;
        if password.is_empty() {
            return Err(CoreError::Validation("Password must not be empty".to_string()));
        }

        self.identity.login(&email, password).await.map_err(|e| {
            warn!(target: "gif.auth", error = %e, "Login failed");
            match e {
                IdentityError::LimitExceeded(_) => CoreError::RateLimited(
                    "Too many login attempts. Please try again later.".to_string(),
                ),
                IdentityError::Unavailable(_) => CoreError::ExternalService(
                    "Authentication service is temporarily unavailable".to_string(),
                ),
                IdentityError::InvalidParameter(m) => CoreError::Validation(m),
                _ => CoreError::Unauthorized(BAD_CREDENTIALS.to_string()),
            }
        })
    }

    /// Resolve verified token claims to the stored user.
    pub async fn current_user(&self, claims: &IdentityClaims) -> Result<User, CoreError> {
        let email = claims
            .email
            .as_deref()
            .ok_or(CoreError::Auth(AuthError::MissingEmail))?
            .to_lowercase();
        self.users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| CoreError::NotFound("User not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SignUpOutcome;
    use crate::ports::identity_provider::MockIdentityProvider;
    use crate::testing::InMemoryUserRepository;

    fn registration(email: &str) -> Registration {
        Registration {
            name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            password: "analytical".to_string(),
            role: UserRole::Customer,
        }
    }

    fn accepting_sign_up() -> MockIdentityProvider {
        let mut idp = MockIdentityProvider::new();
        idp.expect_sign_up().returning(|_, _, _| {
            Ok(SignUpOutcome {
                user_sub: "sub-1".to_string(),
                confirmed: false,
            })
        });
        idp
    }

    fn claims(email: Option<&str>) -> IdentityClaims {
        IdentityClaims {
            sub: "sub-1".to_string(),
            email: email.map(str::to_string),
            name: None,
            username: None,
            token_use: Some("id".to_string()),
            exp: 0,
            iat: None,
        }
    }

    #[tokio::test]
    async fn register_twice_returns_existing_user() {
        let svc = AuthService::new(
            Arc::new(accepting_sign_up()),
            Arc::new(InMemoryUserRepository::default()),
        );
        let first = svc.register(registration("ada@x.io")).await.unwrap();
        assert!(first.created);

        let second = svc.register(registration("ADA@x.io")).await.unwrap();
        assert!(!second.created);
        assert_eq!(second.user.id, first.user.id);
    }

    #[tokio::test]
    async fn register_surfaces_provider_message_as_validation() {
        let mut idp = MockIdentityProvider::new();
        idp.expect_sign_up().returning(|_, _, _| {
            Err(IdentityError::InvalidPassword(
                "Password must have symbol characters".to_string(),
            ))
        });
        let users = Arc::new(InMemoryUserRepository::default());
        let svc = AuthService::new(Arc::new(idp), users.clone());

        let err = svc.register(registration("ada@x.io")).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref m) if m.contains("symbol characters")));
        assert!(users.find_by_email("ada@x.io").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn register_validates_before_calling_provider() {
        let mut idp = MockIdentityProvider::new();
        idp.expect_sign_up().never();
        let svc = AuthService::new(Arc::new(idp), Arc::new(InMemoryUserRepository::default()));

        let mut short = registration("ada@x.io");
        short.password = "short".to_string();
        assert!(matches!(
            svc.register(short).await,
            Err(CoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn login_maps_provider_failures() {
        let cases = [
            (
                IdentityError::NotAuthorized("Incorrect username or password.".to_string()),
                "unauthorized",
            ),
            (
                IdentityError::UserNotConfirmed("User is not confirmed.".to_string()),
                "unauthorized",
            ),
            (
                IdentityError::LimitExceeded("slow down".to_string()),
                "rate",
            ),
            (IdentityError::Unavailable("dns".to_string()), "external"),
        ];
        for (provider_err, expected) in cases {
            let mut idp = MockIdentityProvider::new();
            let returned = provider_err.clone();
            idp.expect_login()
                .returning(move |_, _| Err(returned.clone()));
            let svc =
                AuthService::new(Arc::new(idp), Arc::new(InMemoryUserRepository::default()));
            let err = svc.login("ada@x.io", "pw").await.unwrap_err();
            let kind = match err {
                CoreError::Unauthorized(ref m) => {
                    assert_eq!(m, BAD_CREDENTIALS);
                    "unauthorized"
                }
                CoreError::RateLimited(_) => "rate",
                CoreError::ExternalService(_) => "external",
                other => panic!("unexpected {other:?}"),
            };
            assert_eq!(kind, expected, "{provider_err:?}");
        }
    }

    #[tokio::test]
    async fn confirm_checks_code_length() {
        let mut idp = MockIdentityProvider::new();
        idp.expect_confirm_sign_up().times(1).returning(|_, _| Ok(()));
        let svc = AuthService::new(Arc::new(idp), Arc::new(InMemoryUserRepository::default()));

        assert!(matches!(
            svc.confirm("ada@x.io", "123").await,
            Err(CoreError::Validation(_))
        ));
        svc.confirm("ada@x.io", "123456").await.unwrap();
    }

    #[tokio::test]
    async fn current_user_requires_email_claim_and_document() {
        let users = Arc::new(InMemoryUserRepository::default());
        let svc = AuthService::new(Arc::new(MockIdentityProvider::new()), users.clone());

        assert!(matches!(
            svc.current_user(&claims(None)).await,
            Err(CoreError::Auth(AuthError::MissingEmail))
        ));
        assert!(matches!(
            svc.current_user(&claims(Some("ada@x.io"))).await,
            Err(CoreError::NotFound(_))
        ));

        users
            .insert(&NewUser {
                email: "ada@x.io".to_string(),
                full_name: None,
                role: UserRole::Admin,
            })
            .await
            .unwrap();
        let user = svc.current_user(&claims(Some("Ada@X.io"))).await.unwrap();
        assert_eq!(user.role, UserRole::Admin);
    }
}

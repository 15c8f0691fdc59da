//! User service - create, list and fetch user documents.

use std::sync::Arc;

use crate::domain::{NewUser, User, UserRole};
use crate::ports::{CoreError, RepositoryError, UserRepository};
use crate::utils::{normalize_email, validate_name};

/// Largest page the user listing accepts.
pub const USER_LIST_LIMIT_MAX: u32 = 1000;

/// Service for user operations.
///
/// A thin facade over `UserRepository` that adds input validation and turns
/// storage outcomes into client-facing errors.
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Create a user document without touching the identity provider.
    pub async fn create(&self, name: &str, email: &str, role: UserRole) -> Result<User, CoreError> {
        let full_name = validate_name(name)?;
        let email = normalize_email(email)?;

        let new_user = NewUser {
            email,
            full_name: Some(full_name),
            role,
        };
        match self.repo.insert(&new_user).await {
            Ok(user) => Ok(user),
            Err(RepositoryError::AlreadyExists(_)) => Err(CoreError::Validation(
                "User with this email already exists".to_string(),
            )),
            Err(e) => Err(CoreError::from(e)),
        }
    }

    /// List users, `limit` in `1..=1000`.
    pub async fn list(&self, limit: u32) -> Result<Vec<User>, CoreError> {
        if !(1..=USER_LIST_LIMIT_MAX).contains(&limit) {
            return Err(CoreError::Validation(format!(
                "limit must be between 1 and {USER_LIST_LIMIT_MAX}"
            )));
        }
        self.repo.list(limit).await.map_err(CoreError::from)
    }

    /// Fetch one user by id.
    pub async fn get(&self, id: &str) -> Result<User, CoreError> {
        match self.repo.find_by_id(id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(CoreError::NotFound("User not found".to_string())),
            Err(RepositoryError::InvalidId(_)) => {
                Err(CoreError::Validation("Invalid user ID format".to_string()))
            }
            Err(e) => Err(CoreError::from(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryUserRepository;

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryUserRepository::default()))
    }

    #[tokio::test]
    async fn create_normalizes_email() {
        let svc = service();
        let user = svc
            .create(" Grace ", "Grace@Navy.MIL", UserRole::Seller)
            .await
            .unwrap();
        assert_eq!(user.email, "grace@navy.mil");
        assert_eq!(user.full_name.as_deref(), Some("Grace"));
        assert_eq!(user.role, UserRole::Seller);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_validation_error() {
        let svc = service();
        svc.create("A", "a@x.io", UserRole::Customer).await.unwrap();
        let err = svc
            .create("B", "A@X.io", UserRole::Customer)
            .await
            .unwrap_err();
        assert!(
            matches!(err, CoreError::Validation(ref m) if m == "User with this email already exists")
        );
    }

    #[tokio::test]
    async fn list_rejects_out_of_range_limits() {
        let svc = service();
        assert!(matches!(svc.list(0).await, Err(CoreError::Validation(_))));
        assert!(matches!(svc.list(1001).await, Err(CoreError::Validation(_))));
        assert!(svc.list(1000).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_respects_limit() {
        let svc = service();
        for i in 0..3 {
            svc.create("N", &format!("u{i}@x.io"), UserRole::Customer)
                .await
                .unwrap();
        }
        assert_eq!(svc.list(2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn get_distinguishes_malformed_and_missing_ids() {
        let svc = service();
        assert!(matches!(
            svc.get("not-an-id").await,
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            svc.get("0123456789abcdef01234567").await,
            Err(CoreError::NotFound(_))
        ));

        let user = svc.create("A", "a@x.io", UserRole::Customer).await.unwrap();
        assert_eq!(svc.get(&user.id).await.unwrap(), user);
    }
}

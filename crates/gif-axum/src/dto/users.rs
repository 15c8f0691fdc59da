//! User DTOs.

use chrono::{DateTime, Utc};
use gif_core::{User, UserRole};
use serde::{Deserialize, Serialize};

const fn default_limit() -> u32 {
    100
}

/// Public view of a user document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    /// Full name, or `"Unknown"` when the profile has none.
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            name: user.display_name().to_string(),
            id: user.id,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateUserResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserListQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

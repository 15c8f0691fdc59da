//! Core services - the application's business logic layer.
//!
//! Services orchestrate between ports (trait interfaces) and domain logic.
//! They never see a concrete database, identity provider or mail API.

mod app_core;
mod auth_service;
mod notification_service;
mod password_reset;
mod user_service;

pub use app_core::AppCore;
pub use auth_service::{AuthService, RegisterOutcome, Registration};
pub use notification_service::{NotificationService, SEARCH_LIMIT_MAX};
pub use password_reset::{PasswordResetService, ResetRequestOutcome};
pub use user_service::{USER_LIST_LIMIT_MAX, UserService};

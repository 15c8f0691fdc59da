//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (MongoDB documents, Cognito wire formats).
//!
//! # Structure
//!
//! - `user` - Registered users (`User`, `NewUser`, `UserRole`)
//! - `notification` - User notifications and flagged-content alerts
//! - `otp` - Password-reset one-time passwords
//! - `identity` - Tokens, code deliveries and claims from the identity provider

pub mod identity;
pub mod notification;
pub mod otp;
mod user;

pub use identity::{AuthTokens, CodeDelivery, IdentityClaims, SignUpOutcome};
pub use notification::{
    FlaggedAction, NewNotification, Notification, NotificationFilter, NotificationPage,
    NotificationStatus, NotificationType, Page,
};
pub use otp::{MAX_ATTEMPTS, NewOtp, OTP_EXPIRY_MINUTES, OTP_LENGTH, OtpRecord, OtpSource, OtpStatus};
pub use user::{NewUser, User, UserRole};

#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod services;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use domain::{
    AuthTokens, CodeDelivery, FlaggedAction, IdentityClaims, MAX_ATTEMPTS, NewNotification,
    NewOtp, NewUser, Notification, NotificationFilter, NotificationPage, NotificationStatus,
    NotificationType, OTP_EXPIRY_MINUTES, OTP_LENGTH, OtpRecord, OtpSource, OtpStatus, Page,
    SignUpOutcome, User, UserRole,
};
pub use ports::{
    AuthError, CoreError, IdentityError, IdentityProvider, MailError, Mailer,
    NotificationRepository, OtpRepository, OutgoingMail, Repos, RepositoryError, TokenVerifier,
    UserRepository,
};
pub use services::{
    AppCore, AuthService, NotificationService, PasswordResetService, RegisterOutcome,
    Registration, ResetRequestOutcome, UserService,
};

//! Repository implementations using MongoDB.
//!
//! These implementations encapsulate all queries and driver access. Neither
//! `mongodb` nor `bson` types ever appear in the port trait signatures.

mod documents;
mod mongo_notification_repository;
mod mongo_otp_repository;
mod mongo_user_repository;

pub use mongo_notification_repository::MongoNotificationRepository;
pub use mongo_otp_repository::MongoOtpRepository;
pub use mongo_user_repository::MongoUserRepository;

pub(crate) const USERS: &str = "users";
pub(crate) const NOTIFICATIONS: &str = "notifications";
pub(crate) const OTPS: &str = "otps";

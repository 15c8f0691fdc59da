#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod factory;
pub mod repositories;
pub mod setup;

// Re-export factory for convenient access
pub use factory::CoreFactory;

pub use repositories::{MongoNotificationRepository, MongoOtpRepository, MongoUserRepository};

pub use setup::{ensure_indexes, setup_database};

#[cfg(test)]
use tokio as _;

#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

mod cognito;
mod config;
mod error;
mod jwks;

// ============================================================================
// Public API
// ============================================================================

pub use cognito::CognitoClient;
pub use config::CognitoConfig;
pub use error::CognitoError;
pub use jwks::JwksVerifier;

// Silence unused dev-dependency warnings
#[cfg(test)]
use chrono as _;
#[cfg(test)]
use wiremock as _;

#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use tower as _;

// Used by main.rs binary
use dotenvy as _;
use tracing_subscriber as _;

pub mod auth;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types
pub use auth::{BearerClaims, CurrentUser};
pub use bootstrap::{AxumContext, OTP_SWEEP_INTERVAL, bootstrap, spawn_otp_sweeper, start_server};
pub use cli::Cli;
pub use config::{CognitoSettings, ConfigError, CorsConfig, MailSettings, ServerConfig};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;

//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the Axum web adapter. All concrete implementations are instantiated here.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use gif_core::{AppCore, IdentityProvider, Mailer, TokenVerifier};
use gif_db::{CoreFactory, setup_database};
use gif_identity::{CognitoClient, CognitoConfig, JwksVerifier};
use gif_mail::{DisabledMailer, SendGridConfig, SendGridMailer};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::config::ServerConfig;

/// How often expired OTP records are purged.
pub const OTP_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// The core application facade.
    pub core: Arc<AppCore>,
    /// Verifies `Authorization: Bearer` tokens.
    pub tokens: Arc<dyn TokenVerifier>,
}

impl AxumContext {
    pub fn new(core: AppCore, tokens: Arc<dyn TokenVerifier>) -> Self {
        Self {
            core: Arc::new(core),
            tokens,
        }
    }
}

/// Bootstrap the Axum server with all services.
pub async fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    info!(
        target: "gif.bootstrap",
        database = %config.mongodb_database,
        region = %config.cognito.region,
        mail_enabled = config.mail.is_some(),
        "Axum bootstrap"
    );

    // 1. Connect to MongoDB and make sure the indexes exist
    let db = setup_database(&config.mongodb_url, &config.mongodb_database).await?;

    // 2. Identity provider and token verifier share one pool configuration
    let cognito = CognitoConfig::new(
        &config.cognito.region,
        &config.cognito.user_pool_id,
        &config.cognito.client_id,
    );
    let identity: Arc<dyn IdentityProvider> = Arc::new(CognitoClient::new(&cognito)?);
    let tokens: Arc<dyn TokenVerifier> = Arc::new(JwksVerifier::new(&cognito)?);

    // 3. Outbound mail, disabled unless fully configured
    let mailer: Arc<dyn Mailer> = match &config.mail {
        Some(mail) => Arc::new(SendGridMailer::new(SendGridConfig::new(
            &mail.api_key,
            &mail.from,
        ))?),
        None => Arc::new(DisabledMailer),
    };

    // 4. Assemble AppCore
    let core = CoreFactory::build_app_core(&db, identity, mailer, &config.app_name);

    Ok(AxumContext::new(core, tokens))
}

/// Purge expired OTP records every `every` until the task is aborted.
///
/// MongoDB's TTL monitor also removes them, but only about once a minute and
/// not at all on other stores.
pub fn spawn_otp_sweeper(core: Arc<AppCore>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = core.password_reset().cleanup_expired(Utc::now()).await {
                warn!(target: "gif.otp", error = %e, "OTP sweep failed");
            }
        }
    })
}

/// Start the web server and run until Ctrl-C.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let ctx = bootstrap(&config).await?;
    let sweeper = spawn_otp_sweeper(Arc::clone(&ctx.core), OTP_SWEEP_INTERVAL);

    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("GiF API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    info!("GiF API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C, shutting down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gif_core::testing::{FakeIdentityProvider, RecordingMailer, in_memory_repos};
    use gif_core::{NewOtp, OtpSource};

    #[tokio::test]
    async fn sweeper_purges_expired_records() {
        let repos = in_memory_repos();
        let otps = Arc::clone(&repos.otps);
        let stale = NewOtp::issue(
            "kid@school.org",
            OtpSource::Local {
                code: "123456".to_string(),
            },
            Utc::now() - chrono::Duration::hours(1),
        );
        otps.replace(&stale).await.unwrap();

        let core = Arc::new(AppCore::new(
            repos,
            Arc::new(FakeIdentityProvider::default()),
            Arc::new(RecordingMailer::default()),
            "MaiTech",
        ));
        let handle = spawn_otp_sweeper(core, Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        assert!(otps.find("kid@school.org", false).await.unwrap().is_none());
    }
}

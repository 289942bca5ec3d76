//! Backend entry-point: loads settings, prepares storage, and runs the server.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::{Clock, DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use campus_security::config::AppSettings;
use campus_security::inbound::http::health::HealthState;
use campus_security::inbound::http::session_config::fingerprint::key_fingerprint;
use campus_security::inbound::http::session_config::{BuildMode, session_settings_from_env};
use campus_security::outbound::security::Argon2PasswordHasher;
use server::{ServerConfig, build_http_state, create_server, prepare_state_inputs};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let inputs = prepare_state_inputs(&settings, Argon2PasswordHasher::default(), clock).await?;
    let http_state = build_http_state(inputs);

    let config = ServerConfig::new(session, settings.bind_addr());
    let (host, port) = config.bind_addr();
    info!(host, port, "starting campus security server");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config, http_state)
        .wrap_err("failed to start HTTP server")?;
    server.await.wrap_err("HTTP server terminated abnormally")
}

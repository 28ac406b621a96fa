//! Traveler service entry point: loads settings, prepares the stores, and
//! serves the HTTP endpoints.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use traveler_backend::inbound::http::health::HealthState;
use traveler_backend::settings::TravelerSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = TravelerSettings::load_from_iter(std::env::args_os()).map_err(|e| {
        error!(error = %e, "failed to load configuration");
        std::io::Error::other(format!("failed to load configuration: {e}"))
    })?;
    let config = ServerConfig::from_settings(&settings).await.map_err(|e| {
        error!(error = %e, "startup failed");
        std::io::Error::other(e.to_string())
    })?;

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, &config)?.await
}

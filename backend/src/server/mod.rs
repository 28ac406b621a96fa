//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, StartupError};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use state_builders::build_http_state;
use traveler_backend::Trace;
use traveler_backend::inbound::http::configure_traveler_routes;
use traveler_backend::inbound::http::health::{HealthState, live, ready};
use traveler_backend::inbound::http::state::HttpState;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_traveler_routes)
        .service(ready)
        .service(live)
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// Readiness is flagged once the listener is bound. Liveness is cleared
/// when an interrupt starts the graceful drain.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(config);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    let handle = server.handle();
    let drain_state = health_state.clone();
    actix_web::rt::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                drain_state.mark_unhealthy();
                info!("interrupt received; draining connections");
                handle.stop(true).await;
            }
            Err(error) => warn!(%error, "failed to listen for interrupt signal"),
        }
    });

    health_state.mark_ready();
    info!(addr = %config.bind_addr, "traveler service listening");
    Ok(server)
}

//! HTTP inbound adapter exposing the traveler REST endpoints.
//!
//! ```text
//! GET    /Traveler/{id}
//! POST   /Traveler
//! DELETE /Traveler/{id}
//! GET    /Travelersql/{id}   (header `Traveler` required)
//! POST   /Travelersql
//! PUT    /Travelersql/{id}
//! GET    /health/ready | /health/live
//! ```

pub mod error;
pub mod health;
pub mod payload;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod travelers;
pub mod travelers_sql;

pub use error::ApiResult;

use actix_web::web;

/// Register the traveler endpoints and their JSON extractor settings.
///
/// Health probes are registered separately because they need the
/// [`health::HealthState`] owned by the server.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use traveler_backend::inbound::http::configure_traveler_routes;
///
/// let app = App::new().configure(configure_traveler_routes);
/// ```
pub fn configure_traveler_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(payload::json_config())
        .service(travelers::get_traveler)
        .service(travelers::create_traveler)
        .service(travelers::delete_traveler)
        .service(travelers_sql::get_traveler_sql)
        .service(travelers_sql::create_traveler_sql)
        .service(travelers_sql::update_traveler_sql);
}

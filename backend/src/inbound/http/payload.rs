//! Request body extraction settings.
//!
//! Malformed or mistyped JSON bodies surface as invalid-request domain
//! errors so they answer with the same failure envelope as validation
//! errors.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use tracing::warn;

use crate::domain::Error;

fn reject_payload(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "rejected malformed traveler payload");
    Error::invalid_request(format!("request body is not a valid traveler: {err}")).into()
}

/// JSON extractor configuration shared by every traveler endpoint.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(reject_payload)
}

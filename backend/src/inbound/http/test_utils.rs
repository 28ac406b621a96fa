//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::test as actix_test;
use serde_json::Value;

use crate::domain::ports::{MockDocumentTravelers, MockSqlTravelers};
use crate::inbound::http::state::HttpState;

/// Build handler state from mocked driving ports.
pub fn mock_state(documents: MockDocumentTravelers, relational: MockSqlTravelers) -> HttpState {
    HttpState::new(Arc::new(documents), Arc::new(relational))
}

/// Read a response body as JSON.
pub async fn json_body<B>(response: ServiceResponse<B>) -> Value
where
    B: MessageBody,
{
    let bytes = actix_test::read_body(response).await;
    serde_json::from_slice(&bytes).expect("JSON response body")
}

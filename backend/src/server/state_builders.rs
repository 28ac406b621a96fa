//! Builders selecting Diesel or in-memory adapters for each store.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use traveler_backend::domain::ports::{DocumentTravelers, SqlTravelers};
use traveler_backend::domain::{TravelerDocumentService, TravelerRecordService};
use traveler_backend::inbound::http::state::HttpState;
use traveler_backend::outbound::memory::{
    InMemoryTravelerDocumentStore, InMemoryTravelerRecordStore,
};
use traveler_backend::outbound::persistence::{
    DieselTravelerDocumentStore, DieselTravelerRecordStore,
};

use super::ServerConfig;

fn build_documents(config: &ServerConfig, clock: Arc<dyn Clock>) -> Arc<dyn DocumentTravelers> {
    match &config.document_pool {
        Some(pool) => {
            let store = DieselTravelerDocumentStore::new(pool.clone())
                .with_page_size(config.query_page_size);
            Arc::new(
                TravelerDocumentService::new(Arc::new(store), clock)
                    .with_delete_concurrency(config.delete_concurrency),
            )
        }
        None => {
            let store =
                InMemoryTravelerDocumentStore::new().with_page_size(config.query_page_size);
            Arc::new(
                TravelerDocumentService::new(Arc::new(store), clock)
                    .with_delete_concurrency(config.delete_concurrency),
            )
        }
    }
}

fn build_relational(config: &ServerConfig, clock: Arc<dyn Clock>) -> Arc<dyn SqlTravelers> {
    match &config.relational_pool {
        Some(pool) => {
            let store = DieselTravelerRecordStore::new(pool.clone(), config.number_format);
            Arc::new(TravelerRecordService::new(Arc::new(store), clock))
        }
        None => {
            let store = InMemoryTravelerRecordStore::new(config.number_format);
            Arc::new(TravelerRecordService::new(Arc::new(store), clock))
        }
    }
}

/// Build the HTTP handler state for `config`.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    web::Data::new(HttpState::new(
        build_documents(config, Arc::clone(&clock)),
        build_relational(config, clock),
    ))
}

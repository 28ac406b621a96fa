//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they depend only on
//! the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DocumentTravelers, SqlTravelers};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Use cases backed by the partitioned document store.
    pub documents: Arc<dyn DocumentTravelers>,
    /// Use cases backed by the relational store.
    pub relational: Arc<dyn SqlTravelers>,
}

impl HttpState {
    /// Bundle the two driving ports.
    pub const fn new(documents: Arc<dyn DocumentTravelers>, relational: Arc<dyn SqlTravelers>) -> Self {
        Self {
            documents,
            relational,
        }
    }
}

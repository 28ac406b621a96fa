//! Driving port for travelers kept in the document store.
//!
//! Inbound adapters call this port with raw path values and payloads; the
//! implementation owns validation and gateway access.

use async_trait::async_trait;

use crate::domain::{Error, ResultEnvelope, TravelerUnit, TravelerUser};

/// Document store use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentTravelers: Send + Sync {
    /// Return the first traveler whose id equals `id`.
    async fn get(&self, id: &str) -> Result<TravelerUser, Error>;

    /// Validate `unit` and store it as a new traveler.
    async fn add(&self, unit: TravelerUnit) -> Result<TravelerUser, Error>;

    /// Delete every document whose id equals `id`, in any partition.
    async fn remove(&self, id: &str) -> Result<ResultEnvelope, Error>;
}

//! Driving port for travelers kept in the relational store.

use async_trait::async_trait;

use crate::domain::{Error, TravelerUnit, TravelerUser};

/// Relational store use cases.
///
/// Ids arrive as raw path segments and must parse as integers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SqlTravelers: Send + Sync {
    /// Fetch a traveler; `requested_by` ends up in `result.requestedBy`.
    async fn get(&self, id: &str, requested_by: &str) -> Result<TravelerUser, Error>;

    /// Validate `unit` and insert it.
    async fn add(&self, unit: TravelerUnit) -> Result<TravelerUser, Error>;

    /// Validate `unit` and overwrite the row with `id`.
    async fn update(&self, id: &str, unit: TravelerUnit) -> Result<TravelerUser, Error>;
}

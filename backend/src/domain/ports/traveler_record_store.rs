//! Driven port for the relational `travelers` table.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{RecordId, TravelerDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by relational store adapters.
    pub enum TravelerRecordStoreError {
        /// The database could not be reached.
        Connection { message: String } =>
            "relational store connection failed: {message}",
        /// A statement failed during execution.
        Query { message: String } =>
            "relational store query failed: {message}",
        /// A constraint rejected the write.
        Conflict { message: String } =>
            "relational store rejected the write: {message}",
        /// A stored value could not be converted back into a domain value.
        Decode { message: String } =>
            "stored traveler could not be decoded: {message}",
    }
}

/// Row read back from the `travelers` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelerRecord {
    /// Row identifier.
    pub id: RecordId,
    /// Traveler name.
    pub name: String,
    /// Traveler country.
    pub country: String,
    /// New-client flag.
    pub is_new_client: bool,
    /// Gross ticket total, parsed with the configured number format.
    pub total_tickets_gross_price: Decimal,
}

/// Port for single-statement reads and writes against `travelers`.
///
/// Every statement binds its values as parameters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TravelerRecordStore: Send + Sync {
    /// Fetch the row with `id`, if any.
    async fn find_by_id(
        &self,
        id: RecordId,
    ) -> Result<Option<TravelerRecord>, TravelerRecordStoreError>;

    /// Insert a row and return the identifier the database assigned.
    async fn insert(&self, draft: &TravelerDraft) -> Result<RecordId, TravelerRecordStoreError>;

    /// Overwrite the row with `id` and return the number of rows affected.
    ///
    /// Zero affected rows is not an error.
    async fn update(
        &self,
        id: RecordId,
        draft: &TravelerDraft,
    ) -> Result<u64, TravelerRecordStoreError>;
}

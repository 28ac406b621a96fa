//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod document_travelers;
mod sql_travelers;
mod traveler_document_store;
mod traveler_record_store;

pub use document_travelers::DocumentTravelers;
#[cfg(test)]
pub use document_travelers::MockDocumentTravelers;
#[cfg(test)]
pub use sql_travelers::MockSqlTravelers;
pub use sql_travelers::SqlTravelers;
#[cfg(test)]
pub use traveler_document_store::MockTravelerDocumentStore;
pub use traveler_document_store::{
    ContinuationToken, DEFAULT_QUERY_PAGE_SIZE, DocumentPage, TravelerDocument,
    TravelerDocumentStore, TravelerDocumentStoreError,
};
#[cfg(test)]
pub use traveler_record_store::MockTravelerRecordStore;
pub use traveler_record_store::{TravelerRecord, TravelerRecordStore, TravelerRecordStoreError};

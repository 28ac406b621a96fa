//! In-memory adapters for the traveler ports.
//!
//! Used when no database URL is configured, and by the HTTP and integration
//! tests. They honour the same contracts as the Diesel stores: partition and
//! id uniqueness, paged id queries, and prices held as formatted text.

mod in_memory_document_store;
mod in_memory_record_store;

pub use in_memory_document_store::InMemoryTravelerDocumentStore;
pub use in_memory_record_store::InMemoryTravelerRecordStore;

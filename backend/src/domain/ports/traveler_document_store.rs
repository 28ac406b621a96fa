//! Driven port for the partitioned traveler document store.
//!
//! Documents live under a partition key (the traveler's country) and are
//! unique per `(partition key, id)`. Lookups by id cross partitions, so the
//! store answers them one page at a time.

use std::num::NonZeroUsize;

use async_trait::async_trait;

use crate::domain::{PartitionKey, TravelerId, TravelerUser};

use super::define_port_error;

define_port_error! {
    /// Errors raised by document store adapters.
    pub enum TravelerDocumentStoreError {
        /// The store could not be reached.
        Connection { message: String } =>
            "document store connection failed: {message}",
        /// A query, write, or delete failed during execution.
        Query { message: String } =>
            "document store query failed: {message}",
        /// A document with the same partition key and id already exists.
        Conflict { id: String } =>
            "a traveler document with id {id} already exists in this partition",
    }
}

/// Documents returned per page when no page size is configured.
pub const DEFAULT_QUERY_PAGE_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(99);

/// Opaque marker for resuming a paged query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    /// Wrap an adapter-specific marker.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the marker text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A stored traveler together with the partition it lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelerDocument {
    /// Partition holding the document.
    pub partition_key: PartitionKey,
    /// Stored traveler.
    pub traveler: TravelerUser,
}

/// One page of query results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPage {
    /// Documents on this page.
    pub documents: Vec<TravelerDocument>,
    /// Marker for the next page; `None` once the result set is exhausted.
    pub continuation: Option<ContinuationToken>,
}

impl DocumentPage {
    /// Final page holding `documents`.
    #[must_use]
    pub fn last(documents: Vec<TravelerDocument>) -> Self {
        Self {
            documents,
            continuation: None,
        }
    }
}

/// Port for document persistence keyed by partition and id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TravelerDocumentStore: Send + Sync {
    /// Fetch one page of documents whose id equals `id`, across partitions.
    ///
    /// Pass `None` for the first page and the returned continuation for the
    /// following ones.
    async fn query_by_id(
        &self,
        id: &TravelerId,
        continuation: Option<ContinuationToken>,
    ) -> Result<DocumentPage, TravelerDocumentStoreError>;

    /// Store a new document under `partition_key`.
    ///
    /// Fails with [`TravelerDocumentStoreError::Conflict`] when the pair
    /// `(partition_key, traveler.id)` is already taken.
    async fn create(
        &self,
        partition_key: &PartitionKey,
        traveler: &TravelerUser,
    ) -> Result<(), TravelerDocumentStoreError>;

    /// Remove the document identified by `(partition_key, id)`.
    async fn delete(
        &self,
        partition_key: &PartitionKey,
        id: &TravelerId,
    ) -> Result<(), TravelerDocumentStoreError>;
}

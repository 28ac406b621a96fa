//! Process-local document store.
//!
//! Documents are keyed by `(partition, id)` in a `BTreeMap`, so queries walk
//! partitions in key order and the continuation token is the last partition
//! returned.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    ContinuationToken, DEFAULT_QUERY_PAGE_SIZE, DocumentPage, TravelerDocument,
    TravelerDocumentStore, TravelerDocumentStoreError,
};
use crate::domain::{PartitionKey, TravelerId, TravelerUser};

/// Document store kept in process memory, keyed by `(partition, id)`.
pub struct InMemoryTravelerDocumentStore {
    documents: Mutex<BTreeMap<(PartitionKey, TravelerId), TravelerUser>>,
    page_size: NonZeroUsize,
}

impl Default for InMemoryTravelerDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTravelerDocumentStore {
    /// Create an empty store using [`DEFAULT_QUERY_PAGE_SIZE`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            documents: Mutex::new(BTreeMap::new()),
            page_size: DEFAULT_QUERY_PAGE_SIZE,
        }
    }

    /// Override the number of documents returned per page.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    fn documents(&self) -> MutexGuard<'_, BTreeMap<(PartitionKey, TravelerId), TravelerUser>> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TravelerDocumentStore for InMemoryTravelerDocumentStore {
    async fn query_by_id(
        &self,
        id: &TravelerId,
        continuation: Option<ContinuationToken>,
    ) -> Result<DocumentPage, TravelerDocumentStoreError> {
        let page_size = self.page_size.get();
        let documents = self.documents();
        let mut matches = documents
            .iter()
            .filter(|((partition, doc_id), _)| {
                doc_id == id
                    && continuation
                        .as_ref()
                        .is_none_or(|token| partition.as_str() > token.as_str())
            })
            .map(|((partition, _), traveler)| TravelerDocument {
                partition_key: partition.clone(),
                traveler: traveler.clone(),
            });

        let page: Vec<TravelerDocument> = matches.by_ref().take(page_size).collect();
        let next = if matches.next().is_some() {
            page.last()
                .map(|document| ContinuationToken::new(document.partition_key.as_str()))
        } else {
            None
        };
        Ok(DocumentPage {
            documents: page,
            continuation: next,
        })
    }

    async fn create(
        &self,
        partition_key: &PartitionKey,
        traveler: &TravelerUser,
    ) -> Result<(), TravelerDocumentStoreError> {
        let key = (partition_key.clone(), traveler.id().clone());
        let mut documents = self.documents();
        if documents.contains_key(&key) {
            return Err(TravelerDocumentStoreError::conflict(traveler.id().as_str()));
        }
        documents.insert(key, traveler.clone());
        Ok(())
    }

    async fn delete(
        &self,
        partition_key: &PartitionKey,
        id: &TravelerId,
    ) -> Result<(), TravelerDocumentStoreError> {
        self.documents()
            .remove(&(partition_key.clone(), id.clone()));
        Ok(())
    }
}

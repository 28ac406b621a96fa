//! Traveler use cases backed by the document store.
//!
//! Reads page through every partition until the first match. Deletes gather
//! the full match set first, then fan out one delete per document with a
//! bounded number in flight.

use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::ports::{
    DocumentTravelers, TravelerDocument, TravelerDocumentStore, TravelerDocumentStoreError,
};
use crate::domain::{
    Error, PartitionKey, ResultEnvelope, TravelerDraft, TravelerId, TravelerUnit, TravelerUser,
};

/// Upper bound on concurrent deletes when none is configured.
pub const DEFAULT_DELETE_CONCURRENCY: NonZeroUsize = NonZeroUsize::MIN.saturating_add(99);

/// Document store service implementing [`DocumentTravelers`].
#[derive(Clone)]
pub struct TravelerDocumentService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    delete_concurrency: NonZeroUsize,
}

impl<S> TravelerDocumentService<S> {
    /// Create a service using [`DEFAULT_DELETE_CONCURRENCY`].
    pub const fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            delete_concurrency: DEFAULT_DELETE_CONCURRENCY,
        }
    }

    /// Override the number of deletes allowed in flight at once.
    #[must_use]
    pub const fn with_delete_concurrency(mut self, delete_concurrency: NonZeroUsize) -> Self {
        self.delete_concurrency = delete_concurrency;
        self
    }

    fn invalid(&self, message: impl Into<String>) -> Error {
        let err = Error::invalid_request(message).with_timestamp(self.clock.utc());
        warn!(message = err.message(), "traveler request rejected");
        err
    }

    fn map_store_error(&self, source: &TravelerDocumentStoreError) -> Error {
        error!(error = %source, "document store call failed");
        Error::persistence(source.to_string()).with_timestamp(self.clock.utc())
    }

    fn parse_id(&self, id: &str) -> Result<TravelerId, Error> {
        TravelerId::new(id).map_err(|err| self.invalid(err.to_string()))
    }
}

impl<S> TravelerDocumentService<S>
where
    S: TravelerDocumentStore,
{
    async fn first_match(&self, id: &TravelerId) -> Result<Option<TravelerDocument>, Error> {
        let mut continuation = None;
        loop {
            let page = self
                .store
                .query_by_id(id, continuation)
                .await
                .map_err(|err| self.map_store_error(&err))?;
            if let Some(document) = page.documents.into_iter().next() {
                return Ok(Some(document));
            }
            match page.continuation {
                Some(next) => continuation = Some(next),
                None => return Ok(None),
            }
        }
    }

    async fn all_matches(&self, id: &TravelerId) -> Result<Vec<TravelerDocument>, Error> {
        let mut matches = Vec::new();
        let mut continuation = None;
        loop {
            let page = self
                .store
                .query_by_id(id, continuation)
                .await
                .map_err(|err| self.map_store_error(&err))?;
            matches.extend(page.documents);
            match page.continuation {
                Some(next) => continuation = Some(next),
                None => return Ok(matches),
            }
        }
    }
}

#[async_trait]
impl<S> DocumentTravelers for TravelerDocumentService<S>
where
    S: TravelerDocumentStore,
{
    async fn get(&self, id: &str) -> Result<TravelerUser, Error> {
        let traveler_id = self.parse_id(id)?;
        match self.first_match(&traveler_id).await? {
            Some(document) => Ok(document
                .traveler
                .with_result(ResultEnvelope::success("", "", self.clock.utc()))),
            None => Err(Error::not_found(format!("No object found with id : {id}"))
                .with_timestamp(self.clock.utc())),
        }
    }

    async fn add(&self, unit: TravelerUnit) -> Result<TravelerUser, Error> {
        let draft = TravelerDraft::try_from(unit).map_err(|err| self.invalid(err.to_string()))?;
        let traveler = TravelerUser::from_draft(
            TravelerId::generate(),
            draft,
            ResultEnvelope::success("", "", self.clock.utc()),
        );
        let partition_key = PartitionKey::for_traveler(&traveler);
        self.store
            .create(&partition_key, &traveler)
            .await
            .map_err(|err| self.map_store_error(&err))?;
        info!(id = %traveler.id(), partition = %partition_key, "traveler document created");
        Ok(traveler)
    }

    async fn remove(&self, id: &str) -> Result<ResultEnvelope, Error> {
        let traveler_id = self.parse_id(id)?;
        let matches = self.all_matches(&traveler_id).await?;
        let targets: Vec<(PartitionKey, TravelerId)> = matches
            .iter()
            .map(|document| (document.partition_key.clone(), document.traveler.id().clone()))
            .collect();
        let outcomes: Vec<Result<(), TravelerDocumentStoreError>> = stream::iter(targets)
            .map(|(partition_key, document_id)| {
                let store = Arc::clone(&self.store);
                async move { store.delete(&partition_key, &document_id).await }
            })
            .buffer_unordered(self.delete_concurrency.get())
            .collect()
            .await;

        let failed = outcomes.iter().filter(|outcome| outcome.is_err()).count();
        if let Some(first) = outcomes.into_iter().find_map(Result::err) {
            error!(
                id,
                matched = matches.len(),
                failed,
                "traveler document delete incomplete"
            );
            return Err(self.map_store_error(&first));
        }

        info!(id, deleted = matches.len(), "traveler documents deleted");
        Ok(ResultEnvelope::success(
            format!("Successfully deleted items with id : {id}"),
            "",
            self.clock.utc(),
        ))
    }
}

#[cfg(test)]
mod tests;

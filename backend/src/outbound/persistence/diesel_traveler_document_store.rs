//! PostgreSQL-backed `TravelerDocumentStore`.
//!
//! Documents are JSONB rows keyed by `(partition_key, id)`. Queries by id
//! walk partitions in key order; the continuation token is the last
//! partition key returned.

use std::num::NonZeroUsize;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    ContinuationToken, DEFAULT_QUERY_PAGE_SIZE, DocumentPage, TravelerDocument,
    TravelerDocumentStore, TravelerDocumentStoreError,
};
use crate::domain::{PartitionKey, TravelerId, TravelerUser};

use super::diesel_helpers::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewTravelerDocumentRow, TravelerDocumentRow};
use super::pool::{DbPool, PoolError};
use super::schema::traveler_documents;

/// Diesel-backed document store.
#[derive(Clone)]
pub struct DieselTravelerDocumentStore {
    pool: DbPool,
    page_size: NonZeroUsize,
}

impl DieselTravelerDocumentStore {
    /// Create a store over `pool` using [`DEFAULT_QUERY_PAGE_SIZE`].
    pub const fn new(pool: DbPool) -> Self {
        Self {
            pool,
            page_size: DEFAULT_QUERY_PAGE_SIZE,
        }
    }

    /// Override the number of documents returned per page.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }
}

fn map_pool_error(error: PoolError) -> TravelerDocumentStoreError {
    TravelerDocumentStoreError::connection(pool_error_message(error))
}

fn map_diesel_error(error: &diesel::result::Error, id: &str) -> TravelerDocumentStoreError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => TravelerDocumentStoreError::connection(message),
        DieselFailure::UniqueViolation => TravelerDocumentStoreError::conflict(id),
        DieselFailure::Query(message) => TravelerDocumentStoreError::query(message),
    }
}

fn row_to_document(row: TravelerDocumentRow) -> Result<TravelerDocument, TravelerDocumentStoreError> {
    let traveler: TravelerUser = serde_json::from_value(row.body).map_err(|err| {
        tracing::debug!(error = %err, "stored traveler document is malformed");
        TravelerDocumentStoreError::query("stored document could not be decoded")
    })?;
    Ok(TravelerDocument {
        partition_key: PartitionKey::new(row.partition_key),
        traveler,
    })
}

#[async_trait]
impl TravelerDocumentStore for DieselTravelerDocumentStore {
    async fn query_by_id(
        &self,
        id: &TravelerId,
        continuation: Option<ContinuationToken>,
    ) -> Result<DocumentPage, TravelerDocumentStoreError> {
        let page_size = self.page_size.get();
        let limit = i64::try_from(page_size.saturating_add(1))
            .map_err(|_| TravelerDocumentStoreError::query("page size exceeds i64 range"))?;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = traveler_documents::table
            .select(TravelerDocumentRow::as_select())
            .filter(traveler_documents::id.eq(id.as_str()))
            .order(traveler_documents::partition_key.asc())
            .into_boxed();

        if let Some(token) = continuation {
            query = query.filter(traveler_documents::partition_key.gt(token.as_str().to_owned()));
        }

        let mut rows = query
            .limit(limit)
            .load::<TravelerDocumentRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, id.as_str()))?;

        let has_next = rows.len() > page_size;
        rows.truncate(page_size);
        let next = if has_next {
            rows.last()
                .map(|row| ContinuationToken::new(row.partition_key.clone()))
        } else {
            None
        };
        let documents = rows
            .into_iter()
            .map(row_to_document)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DocumentPage {
            documents,
            continuation: next,
        })
    }

    async fn create(
        &self,
        partition_key: &PartitionKey,
        traveler: &TravelerUser,
    ) -> Result<(), TravelerDocumentStoreError> {
        let body = serde_json::to_value(traveler)
            .map_err(|err| TravelerDocumentStoreError::query(err.to_string()))?;
        let row = NewTravelerDocumentRow {
            partition_key: partition_key.as_str(),
            id: traveler.id().as_str(),
            body,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(traveler_documents::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(&err, traveler.id().as_str()))
    }

    async fn delete(
        &self,
        partition_key: &PartitionKey,
        id: &TravelerId,
    ) -> Result<(), TravelerDocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(
            traveler_documents::table
                .filter(traveler_documents::partition_key.eq(partition_key.as_str()))
                .filter(traveler_documents::id.eq(id.as_str())),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(|err| map_diesel_error(&err, id.as_str()))
    }
}

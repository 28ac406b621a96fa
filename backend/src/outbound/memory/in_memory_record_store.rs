//! Process-local relational store with sequential row ids.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{TravelerRecord, TravelerRecordStore, TravelerRecordStoreError};
use crate::domain::{NumberFormat, RecordId, TravelerDraft};

#[derive(Debug, Clone)]
struct StoredRow {
    name: String,
    country: String,
    is_new_client: bool,
    total_tickets_gross_price: String,
}

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, StoredRow>,
}

/// Relational store kept in process memory.
///
/// Prices are stored as text written with the configured [`NumberFormat`]
/// and parsed back with it on read.
pub struct InMemoryTravelerRecordStore {
    table: Mutex<Table>,
    number_format: NumberFormat,
}

impl InMemoryTravelerRecordStore {
    /// Create an empty store formatting prices with `number_format`.
    #[must_use]
    pub fn new(number_format: NumberFormat) -> Self {
        Self {
            table: Mutex::new(Table::default()),
            number_format,
        }
    }

    fn table(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn to_row(&self, draft: &TravelerDraft) -> StoredRow {
        StoredRow {
            name: draft.name().to_owned(),
            country: draft.country().to_owned(),
            is_new_client: draft.is_new_client(),
            total_tickets_gross_price: self
                .number_format
                .format_decimal(draft.total_tickets_gross_price()),
        }
    }
}

#[async_trait]
impl TravelerRecordStore for InMemoryTravelerRecordStore {
    async fn find_by_id(
        &self,
        id: RecordId,
    ) -> Result<Option<TravelerRecord>, TravelerRecordStoreError> {
        let Some(row) = self.table().rows.get(&id.get()).cloned() else {
            return Ok(None);
        };
        let total_tickets_gross_price = self
            .number_format
            .parse_decimal(&row.total_tickets_gross_price)
            .map_err(|err| TravelerRecordStoreError::decode(err.to_string()))?;
        Ok(Some(TravelerRecord {
            id,
            name: row.name,
            country: row.country,
            is_new_client: row.is_new_client,
            total_tickets_gross_price,
        }))
    }

    async fn insert(&self, draft: &TravelerDraft) -> Result<RecordId, TravelerRecordStoreError> {
        let row = self.to_row(draft);
        let mut table = self.table();
        table.next_id = table
            .next_id
            .checked_add(1)
            .ok_or_else(|| TravelerRecordStoreError::conflict("row id sequence exhausted"))?;
        let id = table.next_id;
        table.rows.insert(id, row);
        Ok(RecordId::new(id))
    }

    async fn update(
        &self,
        id: RecordId,
        draft: &TravelerDraft,
    ) -> Result<u64, TravelerRecordStoreError> {
        let row = self.to_row(draft);
        let mut table = self.table();
        match table.rows.get_mut(&id.get()) {
            Some(existing) => {
                *existing = row;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

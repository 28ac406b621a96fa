//! PostgreSQL-backed `TravelerRecordStore` using parameterised raw SQL.
//!
//! The price column is `NUMERIC`. It is bound as invariant text and read
//! back as text parsed with the configured [`NumberFormat`], so no
//! conversion depends on the host locale.

use async_trait::async_trait;
use diesel::OptionalExtension;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Bool, Text};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TravelerRecord, TravelerRecordStore, TravelerRecordStoreError};
use crate::domain::{NumberFormat, RecordId, TravelerDraft};

use super::diesel_helpers::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{InsertedId, TravelerRow};
use super::pool::{DbPool, PoolError};

const SELECT_SQL: &str = r"
SELECT id, name, country, is_new_client, total_tickets_gross_price::text AS total_tickets_gross_price
FROM travelers
WHERE id = $1
";

const INSERT_SQL: &str = r"
INSERT INTO travelers (name, country, is_new_client, total_tickets_gross_price)
VALUES ($1, $2, $3, CAST($4 AS NUMERIC))
RETURNING id
";

const UPDATE_SQL: &str = r"
UPDATE travelers
SET name = $1, country = $2, is_new_client = $3, total_tickets_gross_price = CAST($4 AS NUMERIC)
WHERE id = $5
";

/// Diesel-backed relational store.
#[derive(Clone)]
pub struct DieselTravelerRecordStore {
    pool: DbPool,
    number_format: NumberFormat,
}

impl DieselTravelerRecordStore {
    /// Create a store over `pool` converting prices with `number_format`.
    pub const fn new(pool: DbPool, number_format: NumberFormat) -> Self {
        Self {
            pool,
            number_format,
        }
    }

    /// Render a price for binding. `NUMERIC` input only accepts `.`.
    fn bind_price(draft: &TravelerDraft) -> String {
        NumberFormat::invariant().format_decimal(draft.total_tickets_gross_price())
    }

    fn row_to_record(&self, row: TravelerRow) -> Result<TravelerRecord, TravelerRecordStoreError> {
        let total_tickets_gross_price = self
            .number_format
            .parse_decimal(&row.total_tickets_gross_price)
            .map_err(|err| TravelerRecordStoreError::decode(err.to_string()))?;
        Ok(TravelerRecord {
            id: RecordId::new(row.id),
            name: row.name,
            country: row.country,
            is_new_client: row.is_new_client,
            total_tickets_gross_price,
        })
    }
}

fn map_pool_error(error: PoolError) -> TravelerRecordStoreError {
    TravelerRecordStoreError::connection(pool_error_message(error))
}

fn map_diesel_error(error: &diesel::result::Error) -> TravelerRecordStoreError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => TravelerRecordStoreError::connection(message),
        DieselFailure::UniqueViolation => {
            TravelerRecordStoreError::conflict("unique constraint violated")
        }
        DieselFailure::Query(message) => TravelerRecordStoreError::query(message),
    }
}

#[async_trait]
impl TravelerRecordStore for DieselTravelerRecordStore {
    async fn find_by_id(
        &self,
        id: RecordId,
    ) -> Result<Option<TravelerRecord>, TravelerRecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let found = sql_query(SELECT_SQL)
            .bind::<BigInt, _>(id.get())
            .get_result::<TravelerRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err))?;
        found.map(|row| self.row_to_record(row)).transpose()
    }

    async fn insert(&self, draft: &TravelerDraft) -> Result<RecordId, TravelerRecordStoreError> {
        let price = Self::bind_price(draft);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let inserted = sql_query(INSERT_SQL)
            .bind::<Text, _>(draft.name())
            .bind::<Text, _>(draft.country())
            .bind::<Bool, _>(draft.is_new_client())
            .bind::<Text, _>(price)
            .get_result::<InsertedId>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;
        Ok(RecordId::new(inserted.id))
    }

    async fn update(
        &self,
        id: RecordId,
        draft: &TravelerDraft,
    ) -> Result<u64, TravelerRecordStoreError> {
        let price = Self::bind_price(draft);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = sql_query(UPDATE_SQL)
            .bind::<Text, _>(draft.name())
            .bind::<Text, _>(draft.country())
            .bind::<Bool, _>(draft.is_new_client())
            .bind::<Text, _>(price)
            .bind::<BigInt, _>(id.get())
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;
        Ok(u64::try_from(affected).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TravelerUnit;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    fn prices_bind_with_a_dot_whatever_the_format() {
        let draft = TravelerDraft::try_from(TravelerUnit {
            name: Some("Bob".to_owned()),
            country: Some("CY".to_owned()),
            is_new_client: false,
            total_tickets_gross_price: Decimal::new(150_500, 3),
        })
        .expect("valid draft");
        assert_eq!(DieselTravelerRecordStore::bind_price(&draft), "150.500");
    }

    #[rstest]
    fn statements_only_use_placeholders() {
        assert!(UPDATE_SQL.contains("WHERE id = $5"));
        assert!(INSERT_SQL.contains("RETURNING id"));
        assert!(!UPDATE_SQL.contains('{'));
    }
}

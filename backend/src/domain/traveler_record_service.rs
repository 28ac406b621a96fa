//! Traveler use cases backed by the relational store.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::ports::{SqlTravelers, TravelerRecordStore, TravelerRecordStoreError};
use crate::domain::{
    Error, RecordId, ResultEnvelope, TravelerDraft, TravelerId, TravelerUnit, TravelerUser,
};

/// Relational store service implementing [`SqlTravelers`].
#[derive(Clone)]
pub struct TravelerRecordService<R> {
    store: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> TravelerRecordService<R> {
    /// Create a new service over `store`.
    pub const fn new(store: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn invalid(&self, message: impl Into<String>) -> Error {
        let err = Error::invalid_request(message).with_timestamp(self.clock.utc());
        warn!(message = err.message(), "traveler request rejected");
        err
    }

    fn map_store_error(&self, source: &TravelerRecordStoreError) -> Error {
        error!(error = %source, "relational store call failed");
        Error::persistence(source.to_string()).with_timestamp(self.clock.utc())
    }

    fn parse_id(&self, id: &str) -> Result<RecordId, Error> {
        RecordId::parse(id).map_err(|err| self.invalid(err.to_string()))
    }

    fn validate(&self, unit: TravelerUnit) -> Result<TravelerDraft, Error> {
        TravelerDraft::try_from(unit).map_err(|err| self.invalid(err.to_string()))
    }

    fn success(&self, requested_by: &str) -> ResultEnvelope {
        ResultEnvelope::success("", requested_by, self.clock.utc())
    }
}

#[async_trait]
impl<R> SqlTravelers for TravelerRecordService<R>
where
    R: TravelerRecordStore,
{
    async fn get(&self, id: &str, requested_by: &str) -> Result<TravelerUser, Error> {
        let record_id = self.parse_id(id)?;
        let record = self
            .store
            .find_by_id(record_id)
            .await
            .map_err(|err| self.map_store_error(&err))?
            .ok_or_else(|| {
                Error::not_found(format!("Nothing found for the id {id}"))
                    .with_timestamp(self.clock.utc())
            })?;
        Ok(TravelerUser::from_stored(
            TravelerId::from(record.id),
            record.name,
            record.country,
            record.is_new_client,
            record.total_tickets_gross_price,
            self.success(requested_by),
        ))
    }

    async fn add(&self, unit: TravelerUnit) -> Result<TravelerUser, Error> {
        let draft = self.validate(unit)?;
        let record_id = self
            .store
            .insert(&draft)
            .await
            .map_err(|err| self.map_store_error(&err))?;
        info!(id = %record_id, "traveler row inserted");
        Ok(TravelerUser::from_draft(
            TravelerId::from(record_id),
            draft,
            self.success(""),
        ))
    }

    async fn update(&self, id: &str, unit: TravelerUnit) -> Result<TravelerUser, Error> {
        let record_id = self.parse_id(id)?;
        let draft = self.validate(unit)?;
        let affected = self
            .store
            .update(record_id, &draft)
            .await
            .map_err(|err| self.map_store_error(&err))?;
        if affected == 0 {
            warn!(id = %record_id, "update matched no traveler row");
        } else {
            info!(id = %record_id, affected, "traveler row updated");
        }
        Ok(TravelerUser::from_draft(
            TravelerId::from(record_id),
            draft,
            self.success(""),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockTravelerRecordStore, TravelerRecord};
    use crate::domain::{ErrorCode, ResultCode};
    use crate::test_support::{fixture_clock, fixture_timestamp};
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn unit() -> TravelerUnit {
        TravelerUnit {
            name: Some("Bob".to_owned()),
            country: Some("CY".to_owned()),
            is_new_client: false,
            total_tickets_gross_price: Decimal::new(1999, 2),
        }
    }

    fn service(store: MockTravelerRecordStore) -> TravelerRecordService<MockTravelerRecordStore> {
        TravelerRecordService::new(Arc::new(store), fixture_clock())
    }

    #[tokio::test]
    async fn get_carries_requester_into_result() {
        let mut store = MockTravelerRecordStore::new();
        store
            .expect_find_by_id()
            .withf(|id| id.get() == 42)
            .times(1)
            .return_once(|id| {
                Ok(Some(TravelerRecord {
                    id,
                    name: "Bob".to_owned(),
                    country: "CY".to_owned(),
                    is_new_client: true,
                    total_tickets_gross_price: Decimal::new(1999, 2),
                }))
            });

        let traveler = service(store).get("42", "agent-7").await.expect("found");

        assert_eq!(traveler.id().as_str(), "42");
        assert_eq!(traveler.result().requested_by(), "agent-7");
        assert_eq!(traveler.result().code(), ResultCode::Success);
        assert_eq!(traveler.result().created_time(), fixture_timestamp());
        assert_eq!(traveler.total_tickets_gross_price(), Decimal::new(1999, 2));
    }

    #[tokio::test]
    async fn get_reports_missing_rows_as_not_found() {
        let mut store = MockTravelerRecordStore::new();
        store
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(None));

        let err = service(store).get("7", "agent-7").await.expect_err("missing");

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Nothing found for the id 7");
    }

    #[rstest]
    #[case("abc")]
    #[case("4.2")]
    #[case("")]
    #[tokio::test]
    async fn non_numeric_ids_fail_before_querying(#[case] id: &str) {
        let store = MockTravelerRecordStore::new();

        let err = service(store)
            .get(id, "agent-7")
            .await
            .expect_err("rejected");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn add_returns_database_assigned_id() {
        let mut store = MockTravelerRecordStore::new();
        store
            .expect_insert()
            .withf(|draft| draft.name() == "Bob" && draft.country() == "CY")
            .times(1)
            .return_once(|_| Ok(RecordId::new(17)));

        let traveler = service(store).add(unit()).await.expect("insert succeeds");

        assert_eq!(traveler.id().as_str(), "17");
        assert_eq!(traveler.name(), "Bob");
        assert_eq!(traveler.total_tickets_gross_price(), Decimal::new(1999, 2));
        assert_eq!(traveler.result().requested_by(), "");
    }

    #[tokio::test]
    async fn add_rejects_missing_country_without_insert() {
        let store = MockTravelerRecordStore::new();
        let invalid = TravelerUnit {
            country: None,
            ..unit()
        };

        let err = service(store).add(invalid).await.expect_err("rejected");

        assert_eq!(err.message(), "The parameter country is not defined.");
    }

    #[tokio::test]
    async fn add_maps_store_failures() {
        let mut store = MockTravelerRecordStore::new();
        store
            .expect_insert()
            .times(1)
            .return_once(|_| Err(TravelerRecordStoreError::connection("pool exhausted")));

        let err = service(store).add(unit()).await.expect_err("store down");

        assert_eq!(err.code(), ErrorCode::PersistenceFailure);
        assert_eq!(
            err.message(),
            "relational store connection failed: pool exhausted"
        );
        assert_eq!(err.occurred_at(), Some(fixture_timestamp()));
    }

    #[rstest]
    #[case(1)]
    #[case(0)]
    #[tokio::test]
    async fn update_is_repeatable_and_tolerates_missing_rows(#[case] affected: u64) {
        let mut store = MockTravelerRecordStore::new();
        store
            .expect_update()
            .withf(|id, draft| id.get() == 5 && draft.name() == "Bob")
            .times(2)
            .returning(move |_, _| Ok(affected));
        let service = service(store);

        let first = service.update("5", unit()).await.expect("first update");
        let second = service.update("5", unit()).await.expect("second update");

        assert_eq!(first, second);
        assert_eq!(first.id().as_str(), "5");
    }
}

//! Tests for the document store service.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rstest::rstest;
use rust_decimal::Decimal;

use super::*;
use crate::domain::ports::{ContinuationToken, DocumentPage, MockTravelerDocumentStore};
use crate::domain::{ErrorCode, ResultCode};
use crate::test_support::{fixture_clock, fixture_timestamp};

const PAGE_SIZE: usize = 100;

fn alice() -> TravelerUnit {
    TravelerUnit {
        name: Some("Alice".to_owned()),
        country: Some("GR".to_owned()),
        is_new_client: true,
        total_tickets_gross_price: Decimal::new(15050, 2),
    }
}

fn stored(id: &str, country: &str) -> TravelerDocument {
    let unit = TravelerUnit {
        country: Some(country.to_owned()),
        ..alice()
    };
    let draft = TravelerDraft::try_from(unit).expect("valid draft");
    let traveler = TravelerUser::from_draft(
        TravelerId::new(id).expect("valid id"),
        draft,
        ResultEnvelope::success("", "", fixture_timestamp()),
    );
    TravelerDocument {
        partition_key: PartitionKey::new(country),
        traveler,
    }
}

/// Serve `total` matches for id `dup`, one partition each, in pages of
/// [`PAGE_SIZE`] with the next start offset as continuation.
fn paged_matches(total: usize) -> impl Fn(&TravelerId, Option<ContinuationToken>) -> Result<DocumentPage, TravelerDocumentStoreError>
+ Send
+ 'static {
    move |_, continuation| {
        let start = continuation.map_or(0, |token| {
            token.as_str().parse::<usize>().expect("numeric token")
        });
        let end = (start + PAGE_SIZE).min(total);
        Ok(DocumentPage {
            documents: (start..end)
                .map(|index| stored("dup", &format!("country-{index}")))
                .collect(),
            continuation: (end < total).then(|| ContinuationToken::new(end.to_string())),
        })
    }
}

fn service(store: MockTravelerDocumentStore) -> TravelerDocumentService<MockTravelerDocumentStore> {
    TravelerDocumentService::new(Arc::new(store), fixture_clock())
}

#[rstest]
#[case(TravelerUnit { name: None, ..alice() }, "The parameter name is not defined.")]
#[case(TravelerUnit { name: Some(" ".to_owned()), ..alice() }, "The parameter name is not defined.")]
#[case(TravelerUnit { country: None, ..alice() }, "The parameter country is not defined.")]
#[tokio::test]
async fn add_rejects_invalid_units_without_store_calls(
    #[case] unit: TravelerUnit,
    #[case] expected: &str,
) {
    let store = MockTravelerDocumentStore::new();

    let err = service(store).add(unit).await.expect_err("validation fails");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), expected);
    assert_eq!(err.occurred_at(), Some(fixture_timestamp()));
}

#[tokio::test]
async fn add_stores_traveler_under_country_partition() {
    let mut store = MockTravelerDocumentStore::new();
    store
        .expect_create()
        .withf(|partition, traveler| partition.as_str() == "GR" && traveler.name() == "Alice")
        .times(1)
        .return_once(|_, _| Ok(()));

    let traveler = service(store).add(alice()).await.expect("create succeeds");

    assert_eq!(traveler.country(), "GR");
    assert!(traveler.is_new_client());
    assert_eq!(traveler.total_tickets_gross_price(), Decimal::new(15050, 2));
    assert_eq!(traveler.result().code(), ResultCode::Success);
    assert_eq!(traveler.result().created_time(), fixture_timestamp());
    assert!(uuid::Uuid::parse_str(traveler.id().as_str()).is_ok());
}

#[tokio::test]
async fn add_maps_conflicts_to_persistence_failures() {
    let mut store = MockTravelerDocumentStore::new();
    store
        .expect_create()
        .times(1)
        .return_once(|_, traveler| {
            Err(TravelerDocumentStoreError::conflict(traveler.id().as_str()))
        });

    let err = service(store).add(alice()).await.expect_err("conflict");

    assert_eq!(err.code(), ErrorCode::PersistenceFailure);
    assert!(err.message().contains("already exists"));
}

#[tokio::test]
async fn get_pages_until_first_match() {
    let mut store = MockTravelerDocumentStore::new();
    store
        .expect_query_by_id()
        .withf(|_, continuation| continuation.is_none())
        .times(1)
        .return_once(|_, _| {
            Ok(DocumentPage {
                documents: Vec::new(),
                continuation: Some(ContinuationToken::new("CY")),
            })
        });
    store
        .expect_query_by_id()
        .withf(|id, continuation| {
            id.as_str() == "abc"
                && continuation.as_ref().map(ContinuationToken::as_str) == Some("CY")
        })
        .times(1)
        .return_once(|_, _| {
            Ok(DocumentPage {
                documents: vec![stored("abc", "GR"), stored("abc", "IT")],
                continuation: Some(ContinuationToken::new("IT")),
            })
        });

    let traveler = service(store).get("abc").await.expect("found");

    assert_eq!(traveler.id().as_str(), "abc");
    assert_eq!(traveler.country(), "GR");
    assert_eq!(traveler.result().code(), ResultCode::Success);
}

#[tokio::test]
async fn get_reports_unknown_ids_as_not_found() {
    let mut store = MockTravelerDocumentStore::new();
    store
        .expect_query_by_id()
        .times(1)
        .return_once(|_, _| Ok(DocumentPage::last(Vec::new())));

    let err = service(store).get("unknown-id").await.expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "No object found with id : unknown-id");
}

#[tokio::test]
async fn get_surfaces_query_failures() {
    let mut store = MockTravelerDocumentStore::new();
    store
        .expect_query_by_id()
        .times(1)
        .return_once(|_, _| Err(TravelerDocumentStoreError::connection("refused")));

    let err = service(store).get("abc").await.expect_err("store down");

    assert_eq!(err.code(), ErrorCode::PersistenceFailure);
    assert_eq!(err.message(), "document store connection failed: refused");
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(100)]
#[case(101)]
#[case(250)]
#[tokio::test]
async fn remove_deletes_every_match(#[case] total: usize) {
    let mut store = MockTravelerDocumentStore::new();
    store
        .expect_query_by_id()
        .times(total.div_ceil(PAGE_SIZE).max(1))
        .returning(paged_matches(total));
    store
        .expect_delete()
        .withf(|_, id| id.as_str() == "dup")
        .times(total)
        .returning(|_, _| Ok(()));

    let envelope = service(store).remove("dup").await.expect("delete succeeds");

    assert_eq!(envelope.code(), ResultCode::Success);
    assert_eq!(
        envelope.description(),
        "Successfully deleted items with id : dup"
    );
}

#[tokio::test]
async fn remove_attempts_every_delete_before_failing() {
    let mut store = MockTravelerDocumentStore::new();
    store
        .expect_query_by_id()
        .times(1)
        .returning(paged_matches(5));
    store.expect_delete().times(5).returning(|partition, _| {
        if partition.as_str() == "country-2" {
            Err(TravelerDocumentStoreError::query("deadlock"))
        } else {
            Ok(())
        }
    });

    let err = service(store).remove("dup").await.expect_err("one delete fails");

    assert_eq!(err.code(), ErrorCode::PersistenceFailure);
    assert_eq!(err.message(), "document store query failed: deadlock");
}

#[derive(Default)]
struct InFlightStore {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    deleted: AtomicUsize,
}

#[async_trait]
impl TravelerDocumentStore for InFlightStore {
    async fn query_by_id(
        &self,
        id: &TravelerId,
        continuation: Option<ContinuationToken>,
    ) -> Result<DocumentPage, TravelerDocumentStoreError> {
        paged_matches(250)(id, continuation)
    }

    async fn create(
        &self,
        _partition_key: &PartitionKey,
        _traveler: &TravelerUser,
    ) -> Result<(), TravelerDocumentStoreError> {
        Ok(())
    }

    async fn delete(
        &self,
        _partition_key: &PartitionKey,
        _id: &TravelerId,
    ) -> Result<(), TravelerDocumentStoreError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.deleted.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test]
async fn remove_caps_deletes_in_flight() {
    let store = Arc::new(InFlightStore::default());
    let limit = NonZeroUsize::new(7).expect("non-zero");
    let service = TravelerDocumentService::new(Arc::clone(&store), fixture_clock())
        .with_delete_concurrency(limit);

    service.remove("dup").await.expect("delete succeeds");

    assert_eq!(store.deleted.load(Ordering::SeqCst), 250);
    let peak = store.peak.load(Ordering::SeqCst);
    assert!(peak <= limit.get(), "peak {peak} exceeded {limit}");
}

#[tokio::test]
async fn remove_runs_on_a_spawned_task_through_the_port() {
    let store = Arc::new(InFlightStore::default());
    let service: Arc<dyn DocumentTravelers> =
        Arc::new(TravelerDocumentService::new(Arc::clone(&store), fixture_clock()));

    let envelope = tokio::spawn(async move { service.remove("dup").await })
        .await
        .expect("task joins")
        .expect("delete succeeds");

    assert_eq!(envelope.code(), ResultCode::Success);
    assert_eq!(store.deleted.load(Ordering::SeqCst), 250);
}

#[rstest]
fn default_delete_concurrency_is_one_hundred() {
    assert_eq!(DEFAULT_DELETE_CONCURRENCY.get(), 100);
}

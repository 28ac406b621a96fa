//! Embedded PostgreSQL helpers shared by the Diesel adapter suites.
//!
//! Each suite gets a temporary database on the shared embedded cluster with
//! one migration set applied. Setup failures fail the test unless
//! `SKIP_TEST_CLUSTER` is truthy, in which case the test is skipped.

use pg_embedded_setup_unpriv::TemporaryDatabase;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use tokio::runtime::Runtime;
use traveler_backend::outbound::persistence::{DbPool, MigrationSet, PoolConfig, run_migrations};

/// A migrated temporary database with a pool and the runtime driving it.
pub struct TestDatabase {
    /// Runtime used to drive every async store call in the test.
    pub runtime: Runtime,
    /// Pool connected to the temporary database.
    pub pool: DbPool,
    _database: TemporaryDatabase,
}

fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn provision(set: MigrationSet) -> Result<TestDatabase, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster_handle().map_err(|err| format!("{err:?}"))?;
    let database = cluster
        .create_temporary_database()
        .map_err(|err| format!("{err:?}"))?;
    let url = database.url().to_string();

    let pool = runtime.block_on(async {
        run_migrations(&url, set)
            .await
            .map_err(|err| err.to_string())?;
        DbPool::new(PoolConfig::new(&url).with_max_size(4).with_min_idle(Some(1)))
            .await
            .map_err(|err| err.to_string())
    })?;

    Ok(TestDatabase {
        runtime,
        pool,
        _database: database,
    })
}

/// Provision a database migrated with `set`, or `None` when the cluster is
/// unavailable and skipping is enabled.
///
/// # Panics
/// Panics when setup fails and `SKIP_TEST_CLUSTER` is not set.
pub fn migrated_database(set: MigrationSet) -> Option<TestDatabase> {
    match provision(set) {
        Ok(database) => Some(database),
        Err(reason) if should_skip_test_cluster() => {
            eprintln!("SKIP-TEST-CLUSTER: {reason}");
            None
        }
        Err(reason) => {
            panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.")
        }
    }
}

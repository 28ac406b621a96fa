//! PostgreSQL persistence adapters using Diesel.
//!
//! Both traveler stores run on `diesel-async` connections checked out of a
//! `bb8` pool. Row structs and table definitions stay private to this
//! module; adapters translate them into domain types.
//!
//! # Example
//!
//! ```no_run
//! use traveler_backend::domain::NumberFormat;
//! use traveler_backend::outbound::persistence::{
//!     DbPool, DieselTravelerRecordStore, PoolConfig,
//! };
//!
//! # async fn connect() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/travelers")).await?;
//! let store = DieselTravelerRecordStore::new(pool, NumberFormat::invariant());
//! # let _ = store;
//! # Ok(())
//! # }
//! ```

mod diesel_helpers;
mod diesel_traveler_document_store;
mod diesel_traveler_record_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_traveler_document_store::DieselTravelerDocumentStore;
pub use diesel_traveler_record_store::DieselTravelerRecordStore;
pub use migrations::{MigrationError, MigrationSet, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

//! Embedded schema migrations for both traveler stores.
//!
//! Each store owns its migration set so the two may live in separate
//! databases. Migrations run on a blocking thread over a synchronous
//! connection.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const DOCUMENT_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/documents");
const RELATIONAL_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/relational");

/// Selects which store's migrations to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationSet {
    /// `traveler_documents` table.
    Documents,
    /// `travelers` table.
    Relational,
}

impl MigrationSet {
    const fn label(self) -> &'static str {
        match self {
            Self::Documents => "documents",
            Self::Relational => "relational",
        }
    }
}

/// Failures while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// The database could not be reached.
    #[error("migration connection failed: {message}")]
    Connect {
        /// Underlying error description.
        message: String,
    },
    /// A migration failed to apply.
    #[error("migration failed: {message}")]
    Apply {
        /// Underlying error description.
        message: String,
    },
    /// The blocking task did not complete.
    #[error("migration task aborted: {message}")]
    Task {
        /// Underlying error description.
        message: String,
    },
}

fn apply(database_url: &str, set: MigrationSet) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| MigrationError::Connect {
        message: err.to_string(),
    })?;
    let migrations = match set {
        MigrationSet::Documents => DOCUMENT_MIGRATIONS,
        MigrationSet::Relational => RELATIONAL_MIGRATIONS,
    };
    conn.run_pending_migrations(migrations)
        .map(|applied| applied.len())
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })
}

/// Apply every pending migration of `set` to `database_url`.
///
/// # Errors
///
/// Returns [`MigrationError`] when the connection or any migration fails.
pub async fn run_migrations(database_url: &str, set: MigrationSet) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || apply(&url, set))
        .await
        .map_err(|err| MigrationError::Task {
            message: err.to_string(),
        })??;
    info!(set = set.label(), applied, "database migrations applied");
    Ok(())
}

//! HTTP server configuration object and its construction from settings.

use std::net::SocketAddr;
use std::num::NonZeroUsize;

use tracing::info;
use traveler_backend::domain::NumberFormat;
use traveler_backend::outbound::persistence::{
    DbPool, MigrationError, MigrationSet, PoolConfig, PoolError, run_migrations,
};
use traveler_backend::settings::{SettingsError, TravelerSettings};

/// Startup failures raised before the server binds.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// A setting failed validation.
    #[error("invalid configuration: {0}")]
    Settings(#[from] SettingsError),
    /// A database pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// Schema migrations failed.
    #[error(transparent)]
    Migration(#[from] MigrationError),
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) document_pool: Option<DbPool>,
    pub(crate) relational_pool: Option<DbPool>,
    pub(crate) delete_concurrency: NonZeroUsize,
    pub(crate) query_page_size: NonZeroUsize,
    pub(crate) number_format: NumberFormat,
}

impl ServerConfig {
    /// Construct a configuration backed by in-memory stores.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        delete_concurrency: NonZeroUsize,
        query_page_size: NonZeroUsize,
        number_format: NumberFormat,
    ) -> Self {
        Self {
            bind_addr,
            document_pool: None,
            relational_pool: None,
            delete_concurrency,
            query_page_size,
            number_format,
        }
    }

    /// Attach a pool for the document store.
    #[must_use]
    pub fn with_document_pool(mut self, pool: DbPool) -> Self {
        self.document_pool = Some(pool);
        self
    }

    /// Attach a pool for the relational store.
    #[must_use]
    pub fn with_relational_pool(mut self, pool: DbPool) -> Self {
        self.relational_pool = Some(pool);
        self
    }

    /// Validate `settings`, apply migrations when enabled, and build pools
    /// for every configured store.
    ///
    /// # Errors
    /// Returns [`StartupError`] when a setting is invalid, a pool cannot be
    /// built, or a migration fails.
    pub async fn from_settings(settings: &TravelerSettings) -> Result<Self, StartupError> {
        let pool_max_size = settings.pool_max_size()?;
        let mut config = Self::new(
            settings.bind_addr()?,
            settings.delete_concurrency()?,
            settings.query_page_size()?,
            settings.number_format()?,
        );

        if let Some(url) = settings.document_store_url() {
            let pool = connect(url, MigrationSet::Documents, settings, pool_max_size).await?;
            config = config.with_document_pool(pool);
        } else {
            info!("document store URL unset; using in-memory document store");
        }

        if let Some(url) = settings.sql_connection_string() {
            let pool = connect(url, MigrationSet::Relational, settings, pool_max_size).await?;
            config = config.with_relational_pool(pool);
        } else {
            info!("relational store URL unset; using in-memory relational store");
        }

        Ok(config)
    }
}

async fn connect(
    url: &str,
    set: MigrationSet,
    settings: &TravelerSettings,
    pool_max_size: u32,
) -> Result<DbPool, StartupError> {
    if settings.run_migrations() {
        run_migrations(url, set).await?;
    }
    Ok(DbPool::new(PoolConfig::new(url).with_max_size(pool_max_size)).await?)
}

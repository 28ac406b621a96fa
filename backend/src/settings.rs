//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `TRAVELER_*` environment variables, CLI flags, or a
//! configuration file. Every field is optional; accessors apply defaults and
//! validate, so an invalid value aborts startup with a descriptive error.

use std::net::SocketAddr;
use std::num::NonZeroUsize;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::ports::DEFAULT_QUERY_PAGE_SIZE;
use crate::domain::{DEFAULT_DELETE_CONCURRENCY, NumberFormat, NumberFormatError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Errors raised while validating loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not a socket address.
    #[error("invalid bind address '{value}'")]
    InvalidBindAddr {
        /// The rejected bind address.
        value: String,
    },
    /// A count that must be positive was zero.
    #[error("{name} must be at least 1")]
    Zero {
        /// Name of the offending setting.
        name: &'static str,
    },
    /// The decimal separator is unusable.
    #[error(transparent)]
    NumberFormat(#[from] NumberFormatError),
}

/// Configuration for the traveler service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRAVELER")]
pub struct TravelerSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL of the document store; unset selects the in-memory store.
    pub document_store_url: Option<String>,
    /// PostgreSQL URL of the relational store; unset selects the in-memory store.
    pub sql_connection_string: Option<String>,
    /// Maximum number of deletes in flight per delete request.
    pub delete_concurrency: Option<usize>,
    /// Documents fetched per query page.
    pub query_page_size: Option<usize>,
    /// Decimal separator used when prices are read back as text: one
    /// character, or `dot`/`comma`.
    pub decimal_separator: Option<String>,
    /// Connections per database pool.
    pub pool_max_size: Option<u32>,
    /// Skip the embedded migrations at startup.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|text| !text.trim().is_empty())
}

fn non_zero(
    value: Option<usize>,
    default: NonZeroUsize,
    name: &'static str,
) -> Result<NonZeroUsize, SettingsError> {
    match value {
        None => Ok(default),
        Some(count) => NonZeroUsize::new(count).ok_or(SettingsError::Zero { name }),
    }
}

impl TravelerSettings {
    /// Bind address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = non_blank(self.bind_addr.as_ref()).unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|_| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
            })
    }

    /// Document store URL, if configured.
    #[must_use]
    pub fn document_store_url(&self) -> Option<&str> {
        non_blank(self.document_store_url.as_ref())
    }

    /// Relational store URL, if configured.
    #[must_use]
    pub fn sql_connection_string(&self) -> Option<&str> {
        non_blank(self.sql_connection_string.as_ref())
    }

    /// Delete fan-out cap, defaulting to 100.
    ///
    /// # Errors
    /// Returns [`SettingsError::Zero`] when configured as 0.
    pub fn delete_concurrency(&self) -> Result<NonZeroUsize, SettingsError> {
        non_zero(
            self.delete_concurrency,
            DEFAULT_DELETE_CONCURRENCY,
            "delete_concurrency",
        )
    }

    /// Document query page size, defaulting to 100.
    ///
    /// # Errors
    /// Returns [`SettingsError::Zero`] when configured as 0.
    pub fn query_page_size(&self) -> Result<NonZeroUsize, SettingsError> {
        non_zero(
            self.query_page_size,
            DEFAULT_QUERY_PAGE_SIZE,
            "query_page_size",
        )
    }

    /// Number format built from the configured separator, `.` by default.
    ///
    /// # Errors
    /// Returns [`SettingsError::NumberFormat`] for unusable separators.
    pub fn number_format(&self) -> Result<NumberFormat, SettingsError> {
        match self.decimal_separator.as_deref() {
            None => Ok(NumberFormat::invariant()),
            Some(value) => Ok(NumberFormat::from_setting(value)?),
        }
    }

    /// Pool size, defaulting to 10.
    ///
    /// # Errors
    /// Returns [`SettingsError::Zero`] when configured as 0.
    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.pool_max_size {
            Some(0) => Err(SettingsError::Zero {
                name: "pool_max_size",
            }),
            Some(size) => Ok(size),
            None => Ok(DEFAULT_POOL_MAX_SIZE),
        }
    }

    /// Whether migrations run at startup; true unless skipped.
    #[must_use]
    pub const fn run_migrations(&self) -> bool {
        !self.skip_migrations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 8] = [
        "TRAVELER_BIND_ADDR",
        "TRAVELER_DOCUMENT_STORE_URL",
        "TRAVELER_SQL_CONNECTION_STRING",
        "TRAVELER_DELETE_CONCURRENCY",
        "TRAVELER_QUERY_PAGE_SIZE",
        "TRAVELER_DECIMAL_SEPARATOR",
        "TRAVELER_POOL_MAX_SIZE",
        "TRAVELER_SKIP_MIGRATIONS",
    ];

    fn unset() -> TravelerSettings {
        TravelerSettings {
            bind_addr: None,
            document_store_url: None,
            sql_connection_string: None,
            delete_concurrency: None,
            query_page_size: None,
            decimal_separator: None,
            pool_max_size: None,
            skip_migrations: false,
        }
    }

    fn load_from_empty_args() -> TravelerSettings {
        TravelerSettings::load_from_iter([OsString::from("traveler")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok("0.0.0.0:8080".parse().expect("socket address"))
        );
        assert!(settings.document_store_url().is_none());
        assert!(settings.sql_connection_string().is_none());
        assert_eq!(settings.delete_concurrency().map(NonZeroUsize::get), Ok(100));
        assert_eq!(settings.query_page_size().map(NonZeroUsize::get), Ok(100));
        assert_eq!(settings.number_format(), Ok(NumberFormat::invariant()));
        assert_eq!(settings.pool_max_size(), Ok(10));
        assert!(settings.run_migrations());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("TRAVELER_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "TRAVELER_SQL_CONNECTION_STRING",
                Some("postgres://localhost/travelers".to_owned()),
            ),
            ("TRAVELER_DELETE_CONCURRENCY", Some("8".to_owned())),
            ("TRAVELER_DECIMAL_SEPARATOR", Some("comma".to_owned())),
            ("TRAVELER_SKIP_MIGRATIONS", Some("true".to_owned())),
            ("TRAVELER_DOCUMENT_STORE_URL", None),
            ("TRAVELER_QUERY_PAGE_SIZE", None),
            ("TRAVELER_POOL_MAX_SIZE", None),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().map(|addr| addr.port()),
            Ok(9000)
        );
        assert_eq!(
            settings.sql_connection_string(),
            Some("postgres://localhost/travelers")
        );
        assert_eq!(settings.delete_concurrency().map(NonZeroUsize::get), Ok(8));
        assert_eq!(
            settings.number_format().map(|format| format.decimal_separator()),
            Ok(',')
        );
        assert!(!settings.run_migrations());
    }

    #[rstest]
    fn quoted_comma_separator_loads_from_environment() {
        let _guard = lock_env(VARS.map(|name| {
            let value = (name == "TRAVELER_DECIMAL_SEPARATOR").then(|| "\",\"".to_owned());
            (name, value)
        }));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.number_format().map(|format| format.decimal_separator()),
            Ok(',')
        );
        assert!(settings.run_migrations());
    }

    #[rstest]
    fn zero_counts_are_rejected() {
        let settings = TravelerSettings {
            delete_concurrency: Some(0),
            pool_max_size: Some(0),
            ..unset()
        };
        assert_eq!(
            settings.delete_concurrency(),
            Err(SettingsError::Zero {
                name: "delete_concurrency"
            })
        );
        assert!(settings.pool_max_size().is_err());
    }

    #[rstest]
    #[case("")]
    #[case("..")]
    #[case("5")]
    fn unusable_separators_are_rejected(#[case] separator: &str) {
        let settings = TravelerSettings {
            decimal_separator: Some(separator.to_owned()),
            ..unset()
        };
        assert!(matches!(
            settings.number_format(),
            Err(SettingsError::NumberFormat(_))
        ));
    }

    #[rstest]
    fn blank_urls_select_in_memory_stores() {
        let settings = TravelerSettings {
            document_store_url: Some("  ".to_owned()),
            ..unset()
        };
        assert!(settings.document_store_url().is_none());
    }

    #[rstest]
    fn malformed_bind_addresses_are_reported() {
        let settings = TravelerSettings {
            bind_addr: Some("localhost".to_owned()),
            ..unset()
        };
        assert_eq!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr {
                value: "localhost".to_owned()
            })
        );
    }
}

//! Traveler shapes: the inbound payload, its validated form, and the stored
//! entity.
//!
//! `TravelerUnit` mirrors the request body and tolerates missing fields so
//! the domain, not the JSON decoder, decides what is mandatory.
//! `TravelerDraft` is the validated form handed to gateways and
//! `TravelerUser` is what gets stored and returned.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ResultEnvelope;

/// Inbound payload for create and update requests.
///
/// Accepts camelCase keys as well as the PascalCase spelling used by older
/// clients.
///
/// # Examples
/// ```
/// use traveler_backend::domain::TravelerUnit;
///
/// let unit: TravelerUnit = serde_json::from_str(
///     r#"{"Name":"Alice","Country":"GR","IsNewClient":true,"TotalTicketsGrossPrice":150.50}"#,
/// )
/// .expect("valid payload");
/// assert_eq!(unit.name.as_deref(), Some("Alice"));
/// assert!(unit.is_new_client);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerUnit {
    /// Traveler name; mandatory.
    #[serde(default, alias = "Name")]
    pub name: Option<String>,
    /// Country, also the document partition key; mandatory.
    #[serde(default, alias = "Country")]
    pub country: Option<String>,
    /// Whether the traveler is a new client.
    #[serde(default, alias = "IsNewClient")]
    pub is_new_client: bool,
    /// Gross total of the traveler's tickets.
    #[serde(
        default,
        alias = "TotalTicketsGrossPrice",
        with = "rust_decimal::serde::arbitrary_precision"
    )]
    pub total_tickets_gross_price: Decimal,
}

/// Validation failures for [`TravelerUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TravelerValidationError {
    /// `name` was absent or blank.
    #[error("The parameter name is not defined.")]
    MissingName,
    /// `country` was absent or blank.
    #[error("The parameter country is not defined.")]
    MissingCountry,
}

/// Validated traveler fields ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelerDraft {
    name: String,
    country: String,
    is_new_client: bool,
    total_tickets_gross_price: Decimal,
}

impl TravelerDraft {
    /// Traveler name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Traveler country.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// New-client flag.
    #[must_use]
    pub const fn is_new_client(&self) -> bool {
        self.is_new_client
    }

    /// Gross ticket total.
    #[must_use]
    pub const fn total_tickets_gross_price(&self) -> Decimal {
        self.total_tickets_gross_price
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

impl TryFrom<TravelerUnit> for TravelerDraft {
    type Error = TravelerValidationError;

    fn try_from(unit: TravelerUnit) -> Result<Self, Self::Error> {
        let name = present(unit.name).ok_or(TravelerValidationError::MissingName)?;
        let country = present(unit.country).ok_or(TravelerValidationError::MissingCountry)?;
        Ok(Self {
            name,
            country,
            is_new_client: unit.is_new_client,
            total_tickets_gross_price: unit.total_tickets_gross_price,
        })
    }
}

/// Validation failure for [`TravelerId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("traveler id must not be empty")]
pub struct TravelerIdError;

/// Traveler identifier, assigned once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TravelerId(String);

impl TravelerId {
    /// Wrap an existing identifier.
    ///
    /// # Errors
    /// Returns [`TravelerIdError`] when `value` is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TravelerIdError> {
        let id: String = value.into();
        if id.trim().is_empty() {
            return Err(TravelerIdError);
        }
        Ok(Self(id))
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TravelerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<RecordId> for TravelerId {
    fn from(value: RecordId) -> Self {
        Self(value.to_string())
    }
}

/// Document store partition key; travelers are partitioned by country.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartitionKey(String);

impl PartitionKey {
    /// Wrap a raw partition key.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Partition key under which `traveler` is stored.
    #[must_use]
    pub fn for_traveler(traveler: &TravelerUser) -> Self {
        Self(traveler.country().to_owned())
    }

    /// Borrow the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raised when a relational id path segment is not numeric.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("id '{value}' is not a valid numeric identifier")]
pub struct RecordIdError {
    value: String,
}

/// Numeric row identifier in the relational store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(i64);

impl RecordId {
    /// Wrap a raw row identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Parse a path segment into a row identifier.
    ///
    /// # Errors
    /// Returns [`RecordIdError`] when `value` is not a 64-bit integer.
    ///
    /// # Examples
    /// ```
    /// use traveler_backend::domain::RecordId;
    ///
    /// assert_eq!(RecordId::parse("42").map(|id| id.get()), Ok(42));
    /// assert!(RecordId::parse("forty-two").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self, RecordIdError> {
        value
            .trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| RecordIdError {
                value: value.to_owned(),
            })
    }

    /// Raw row identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored and returned traveler entity.
///
/// ## Invariants
/// - `id` never changes after construction.
/// - `result` describes the operation that produced this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerUser {
    id: TravelerId,
    name: String,
    country: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    total_tickets_gross_price: Decimal,
    #[serde(default)]
    is_new_client: bool,
    result: ResultEnvelope,
}

impl TravelerUser {
    /// Build a traveler from validated fields.
    #[must_use]
    pub fn from_draft(id: TravelerId, draft: TravelerDraft, result: ResultEnvelope) -> Self {
        let TravelerDraft {
            name,
            country,
            is_new_client,
            total_tickets_gross_price,
        } = draft;
        Self {
            id,
            name,
            country,
            total_tickets_gross_price,
            is_new_client,
            result,
        }
    }

    /// Rebuild a traveler from stored fields without re-validating them.
    #[must_use]
    pub fn from_stored(
        id: TravelerId,
        name: String,
        country: String,
        is_new_client: bool,
        total_tickets_gross_price: Decimal,
        result: ResultEnvelope,
    ) -> Self {
        Self {
            id,
            name,
            country,
            total_tickets_gross_price,
            is_new_client,
            result,
        }
    }

    /// Traveler identifier.
    #[must_use]
    pub const fn id(&self) -> &TravelerId {
        &self.id
    }

    /// Traveler name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Traveler country.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Gross ticket total.
    #[must_use]
    pub const fn total_tickets_gross_price(&self) -> Decimal {
        self.total_tickets_gross_price
    }

    /// New-client flag.
    #[must_use]
    pub const fn is_new_client(&self) -> bool {
        self.is_new_client
    }

    /// Envelope describing the producing operation.
    #[must_use]
    pub const fn result(&self) -> &ResultEnvelope {
        &self.result
    }

    /// Replace the envelope, keeping every other field.
    #[must_use]
    pub fn with_result(mut self, result: ResultEnvelope) -> Self {
        self.result = result;
        self
    }
}

//! Uniform result envelope attached to every traveler operation.
//!
//! Successful operations embed the envelope inside the returned traveler;
//! failures return it on its own. The numeric code is part of the public
//! JSON contract: `1000` for success and `2000` for failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome code carried by a [`ResultEnvelope`].
///
/// Serialised as its numeric value.
///
/// # Examples
/// ```
/// use traveler_backend::domain::ResultCode;
///
/// assert_eq!(u16::from(ResultCode::Success), 1000);
/// assert_eq!(ResultCode::try_from(2000), Ok(ResultCode::Failure));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum ResultCode {
    /// The operation completed.
    Success,
    /// The operation failed validation or persistence.
    Failure,
}

impl ResultCode {
    const SUCCESS: u16 = 1000;
    const FAILURE: u16 = 2000;
}

impl From<ResultCode> for u16 {
    fn from(value: ResultCode) -> Self {
        match value {
            ResultCode::Success => ResultCode::SUCCESS,
            ResultCode::Failure => ResultCode::FAILURE,
        }
    }
}

/// Raised when decoding a numeric code outside the defined set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown result code {0}; expected 1000 or 2000")]
pub struct UnknownResultCode(pub u16);

impl TryFrom<u16> for ResultCode {
    type Error = UnknownResultCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            Self::SUCCESS => Ok(Self::Success),
            Self::FAILURE => Ok(Self::Failure),
            other => Err(UnknownResultCode(other)),
        }
    }
}

/// Response envelope: code, description, creation time, and requester.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use traveler_backend::domain::{ResultCode, ResultEnvelope};
///
/// let envelope = ResultEnvelope::success("", "agent-7", Utc::now());
/// assert_eq!(envelope.code(), ResultCode::Success);
/// assert_eq!(envelope.requested_by(), "agent-7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope {
    code: ResultCode,
    #[serde(default)]
    description: String,
    created_time: DateTime<Utc>,
    #[serde(default)]
    requested_by: String,
}

impl ResultEnvelope {
    /// Build a success envelope.
    pub fn success(
        description: impl Into<String>,
        requested_by: impl Into<String>,
        created_time: DateTime<Utc>,
    ) -> Self {
        Self {
            code: ResultCode::Success,
            description: description.into(),
            created_time,
            requested_by: requested_by.into(),
        }
    }

    /// Build a failure envelope. Failures carry no requester.
    pub fn failure(description: impl Into<String>, created_time: DateTime<Utc>) -> Self {
        Self {
            code: ResultCode::Failure,
            description: description.into(),
            created_time,
            requested_by: String::new(),
        }
    }

    /// Outcome code.
    #[must_use]
    pub const fn code(&self) -> ResultCode {
        self.code
    }

    /// Human-readable description of the outcome.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Instant at which the envelope was produced.
    #[must_use]
    pub const fn created_time(&self) -> DateTime<Utc> {
        self.created_time
    }

    /// Identifier of the requesting party, empty when not supplied.
    #[must_use]
    pub fn requested_by(&self) -> &str {
        &self.requested_by
    }
}

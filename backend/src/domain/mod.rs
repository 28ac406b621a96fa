//! Domain primitives, services, and ports.
//!
//! Purpose: Define the Traveler entities shared by the HTTP and persistence
//! layers, the services orchestrating each operation, and the ports through
//! which those services reach storage. Nothing in this module depends on
//! Actix or Diesel.
//!
//! Public surface:
//! - `Error`: transport agnostic failure.
//! - `ResultEnvelope`: uniform success/failure payload.
//! - `TravelerUnit`, `TravelerDraft`, `TravelerUser`: inbound, validated, and
//!   stored traveler shapes.
//! - `NumberFormat`: explicit decimal separator configuration.
//! - `TravelerDocumentService`, `TravelerRecordService`: driving port
//!   implementations.

pub mod error;
pub mod number_format;
pub mod ports;
pub mod result_envelope;
pub mod trace_id;
pub mod traveler;
mod traveler_document_service;
mod traveler_record_service;

pub use self::error::{Error, ErrorCode};
pub use self::number_format::{NumberFormat, NumberFormatError};
pub use self::result_envelope::{ResultCode, ResultEnvelope};
pub use self::trace_id::TraceId;
pub use self::traveler::{
    PartitionKey, RecordId, RecordIdError, TravelerDraft, TravelerId, TravelerIdError,
    TravelerUnit, TravelerUser, TravelerValidationError,
};
pub use self::traveler_document_service::{
    DEFAULT_DELETE_CONCURRENCY, TravelerDocumentService,
};
pub use self::traveler_record_service::TravelerRecordService;

/// HTTP header used to expose the per-request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

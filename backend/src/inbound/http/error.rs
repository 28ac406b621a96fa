//! HTTP adapter mapping for domain errors.
//!
//! Validation and persistence failures answer `400 Bad Request` with a
//! failure [`ResultEnvelope`] (code `2000`). Missing travelers answer
//! `404 Not Found` with the description as a bare JSON string.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::Utc;

use crate::domain::{Error, ErrorCode, ResultEnvelope, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidRequest | ErrorCode::PersistenceFailure => StatusCode::BAD_REQUEST,
    }
}

fn failure_envelope(error: &Error) -> ResultEnvelope {
    let at = error.occurred_at().unwrap_or_else(Utc::now);
    ResultEnvelope::failure(error.message(), at)
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        match self.code() {
            ErrorCode::NotFound => builder.json(self.message()),
            ErrorCode::InvalidRequest | ErrorCode::PersistenceFailure => {
                builder.json(failure_envelope(self))
            }
        }
    }
}

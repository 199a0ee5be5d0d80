//! Typed errors for record ingest and validation.
//!
//! The calculation paths never error: degenerate arithmetic inputs (zero
//! budget, zero available capacity) produce defined fallback values so a
//! dashboard degrades instead of blanking out. The errors here cover the
//! one class that must fail loudly — shape and data-integrity violations
//! in the records handed to the engine, which indicate an upstream
//! problem the calling layer needs to surface rather than render.

use thiserror::Error;

/// Errors produced while ingesting or validating ledger records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WipError {
    /// A record did not deserialize into the expected shape (missing
    /// breakdown field, unknown status or job type, malformed JSON).
    #[error("malformed record: {0}")]
    Shape(String),

    /// A field deserialized but holds a value the engine rejects.
    #[error("invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// `on_hold_date` must be present exactly when status is `OnHold`.
    #[error("job {job_id}: on_hold_date is set iff status is OnHold")]
    OnHoldInvariant { job_id: String },

    /// A schedule field was neither an ISO date nor `"unscheduled"`.
    #[error("unrecognized schedule value {0:?} (expected ISO date or \"unscheduled\")")]
    ScheduleFormat(String),
}

impl WipError {
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        WipError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type WipResult<T> = Result<T, WipError>;

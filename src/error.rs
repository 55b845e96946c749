//! Error types.

use std::io;
use std::num::ParseIntError;
use std::str::Utf8Error;

use thiserror::Error;

/// Unified error type for everything in the crate
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid TZ string
    #[error("invalid TZ string: {0}")]
    InvalidTzString(&'static str),
    /// Transition rule error
    #[error("invalid transition rule: {0}")]
    TransitionRule(&'static str),
    /// Calendar date error
    #[error("invalid date: {0}")]
    Date(&'static str),
    /// Time of day error
    #[error("invalid time of day: {0}")]
    TimeOfDay(&'static str),
    /// Schedule rule error
    #[error("invalid schedule: {0}")]
    Schedule(&'static str),
    /// Out of range error
    #[error("{0}")]
    OutOfRange(&'static str),
    /// Format string error
    #[error("invalid format string: {0}")]
    Format(&'static str),
    /// I/O error
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Integer parsing error
    #[error(transparent)]
    ParseInt(#[from] ParseIntError),
    /// UTF-8 error
    #[error(transparent)]
    Utf8(#[from] Utf8Error),
    /// JSON decoding error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

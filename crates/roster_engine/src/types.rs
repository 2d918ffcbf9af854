use std::fmt;

use roster_core::{PendingRow, Record, RecordId};
use thiserror::Error;

use crate::spreadsheet::ImportError;

#[derive(Debug)]
pub enum EngineEvent {
    RecordsLoaded(Result<Vec<Record>, ApiError>),
    RecordsDeleted(DeleteReport),
    RecordsInserted {
        rows: Vec<PendingRow>,
        result: Result<(), ApiError>,
    },
    SpreadsheetParsed(Result<Vec<PendingRow>, ImportError>),
}

/// Outcome of a sequential delete run. Every requested id is listed in
/// `requested`; the ones the server did not confirm also appear in `failed`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteReport {
    pub requested: Vec<RecordId>,
    pub failed: Vec<(RecordId, ApiError)>,
}

impl DeleteReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &RecordId> {
        self.requested
            .iter()
            .filter(|id| !self.failed.iter().any(|(failed, _)| failed == *id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Encode,
    Decode,
    Network,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::InvalidUrl => write!(f, "invalid url"),
            ApiErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            ApiErrorKind::Timeout => write!(f, "timeout"),
            ApiErrorKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            ApiErrorKind::Encode => write!(f, "request encoding failed"),
            ApiErrorKind::Decode => write!(f, "response decoding failed"),
            ApiErrorKind::Network => write!(f, "network error"),
        }
    }
}

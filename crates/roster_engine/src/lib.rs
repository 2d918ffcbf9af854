//! Roster engine: records API client, spreadsheet import and effect execution.
mod client;
mod engine;
mod spreadsheet;
mod types;

pub use client::{
    delete_sequentially, ClientSettings, RecordsClient, ReqwestRecordsClient, DEFAULT_BASE_URL,
};
pub use engine::EngineHandle;
pub use spreadsheet::{
    is_supported_extension, parse_workbook, read_spreadsheet, ImportError, SUPPORTED_EXTENSIONS,
};
pub use types::{ApiError, ApiErrorKind, DeleteReport, EngineEvent};

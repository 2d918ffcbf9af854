use std::path::PathBuf;

use crate::{PendingRow, RecordId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read the full record list from the records endpoint.
    LoadRecords,
    /// Delete each id, one request at a time, in the given order.
    DeleteRecords(Vec<RecordId>),
    /// Send the rows as one bulk-insert request.
    InsertRecords(Vec<PendingRow>),
    /// Read and parse a spreadsheet into pending rows.
    ParseSpreadsheet { path: PathBuf },
}

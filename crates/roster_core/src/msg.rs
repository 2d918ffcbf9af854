use std::path::PathBuf;

use crate::{LevelFilter, PendingRow, Record, RecordId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The view came up; records need loading.
    Mounted,
    /// User asked for a fresh copy of the record list.
    ReloadRequested,
    /// Engine returned the full record list.
    RecordsLoaded(Vec<Record>),
    /// Reading the record list failed (non-success status or transport error).
    RecordsLoadFailed(String),
    /// User clicked Delete on a single row.
    DeleteRequested(RecordId),
    /// User asked to delete every selected record.
    DeleteSelectedRequested,
    /// Engine finished a sequential delete run. `failed` holds per-id reasons.
    RecordsDeleted {
        ids: Vec<RecordId>,
        failed: Vec<(RecordId, String)>,
    },
    /// User toggled a row check-box.
    ToggleSelect(RecordId),
    /// User toggled the header check-box.
    ToggleSelectAll,
    /// User edited the search box.
    SearchChanged(String),
    /// User picked a level in the drop-down.
    LevelFilterChanged(LevelFilter),
    /// User stepped the level drop-down to its next entry.
    CycleLevelFilter,
    /// Move the highlighted row by a signed offset within the filtered view.
    CursorMoved(isize),
    /// Highlight an absolute row of the filtered view.
    CursorTo(usize),
    /// File picker closed; `None` when nothing was chosen.
    FileChosen(Option<PathBuf>),
    /// Engine parsed the chosen spreadsheet.
    SpreadsheetParsed(Vec<PendingRow>),
    /// Engine could not read or parse the chosen spreadsheet.
    SpreadsheetFailed(String),
    /// User clicked Confirm Insert on the preview.
    ConfirmInsertRequested,
    /// Engine stored the rows through the bulk-insert endpoint.
    RecordsInserted(Vec<PendingRow>),
    /// Bulk insert was rejected or did not complete.
    InsertFailed(String),
    /// User discarded the preview without inserting.
    PreviewDismissed,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

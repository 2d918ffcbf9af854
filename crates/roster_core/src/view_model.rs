use crate::{Level, LevelFilter, PendingRow, RecordId};

pub const NO_RECORDS_MESSAGE: &str = "No records found";
pub const PREVIEW_HEADING: &str = "Preview (First 10 Records)";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// Filtered view of the records, source order.
    pub rows: Vec<RecordRowView>,
    pub total_records: usize,
    pub selected_count: usize,
    /// Header check-box state.
    pub all_selected: bool,
    pub empty_message: Option<&'static str>,
    pub cursor: Option<usize>,
    pub search_query: String,
    pub level_filter: LevelFilter,
    pub preview: Option<PreviewView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRowView {
    pub id: RecordId,
    pub name: String,
    pub position: String,
    pub level: Level,
    pub selected: bool,
    pub highlighted: bool,
    /// Appended locally after an insert and not reloaded yet.
    pub provisional: bool,
    pub edit_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewView {
    pub heading: &'static str,
    pub rows: Vec<PendingRow>,
}

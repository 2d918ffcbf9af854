use crate::filter::filter_records;
use crate::view_model::{AppViewModel, PreviewView, RecordRowView, NO_RECORDS_MESSAGE, PREVIEW_HEADING};
use crate::{FilterState, LevelFilter, PendingRow, Record, RecordId, Selection};

/// Upper bound on rows kept from an uploaded spreadsheet.
pub const MAX_PREVIEW_ROWS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    records: Vec<Record>,
    selection: Selection,
    filter: FilterState,
    preview_rows: Vec<PendingRow>,
    preview_visible: bool,
    cursor: usize,
    next_provisional: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn preview_rows(&self) -> &[PendingRow] {
        &self.preview_rows
    }

    pub fn preview_visible(&self) -> bool {
        self.preview_visible
    }

    pub fn filtered_records(&self) -> Vec<&Record> {
        filter_records(&self.records, &self.filter)
    }

    /// Id of the highlighted row in the filtered view, if any.
    pub fn highlighted_id(&self) -> Option<RecordId> {
        self.filtered_records()
            .get(self.cursor)
            .map(|record| record.id.clone())
    }

    pub fn view(&self) -> AppViewModel {
        let filtered = self.filtered_records();
        let rows: Vec<RecordRowView> = filtered
            .iter()
            .enumerate()
            .map(|(idx, record)| RecordRowView {
                id: record.id.clone(),
                name: record.name.clone(),
                position: record.position.clone(),
                level: record.level,
                selected: self.selection.contains(&record.id),
                highlighted: idx == self.cursor,
                provisional: record.id.is_provisional(),
                edit_path: format!("/edit/{}", record.id),
            })
            .collect();

        let preview = self.preview_visible.then(|| PreviewView {
            heading: PREVIEW_HEADING,
            rows: self.preview_rows.clone(),
        });

        AppViewModel {
            empty_message: rows.is_empty().then_some(NO_RECORDS_MESSAGE),
            cursor: (!rows.is_empty()).then_some(self.cursor),
            rows,
            total_records: self.records.len(),
            selected_count: self.selection.len(),
            all_selected: self.selection.len() == self.records.len(),
            search_query: self.filter.search_query.clone(),
            level_filter: self.filter.level,
            preview,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Replaces the record list and drops selected ids that went away.
    pub(crate) fn replace_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.selection.retain_present(&self.records);
        self.clamp_cursor();
        self.mark_dirty();
    }

    pub(crate) fn remove_records(&mut self, ids: &[RecordId]) {
        self.records.retain(|record| !ids.contains(&record.id));
        self.selection.remove_all(ids);
        self.clamp_cursor();
        self.mark_dirty();
    }

    pub(crate) fn append_inserted(&mut self, rows: Vec<PendingRow>) {
        for row in rows {
            self.next_provisional += 1;
            let id = RecordId::provisional(self.next_provisional);
            self.records.push(row.into_record(id));
        }
        self.mark_dirty();
    }

    pub(crate) fn toggle_select(&mut self, id: RecordId) {
        self.selection.toggle(id);
        self.mark_dirty();
    }

    pub(crate) fn toggle_select_all(&mut self) {
        self.selection.toggle_all(&self.records);
        self.mark_dirty();
    }

    pub(crate) fn selected_ids_in_order(&self) -> Vec<RecordId> {
        self.selection.ordered_ids(&self.records)
    }

    pub(crate) fn set_search_query(&mut self, query: String) {
        if self.filter.search_query != query {
            self.filter.search_query = query;
            self.clamp_cursor();
            self.mark_dirty();
        }
    }

    pub(crate) fn set_level_filter(&mut self, level: LevelFilter) {
        if self.filter.level != level {
            self.filter.level = level;
            self.clamp_cursor();
            self.mark_dirty();
        }
    }

    pub(crate) fn move_cursor(&mut self, delta: isize) {
        let target = if delta.is_negative() {
            self.cursor.saturating_sub(delta.unsigned_abs())
        } else {
            self.cursor.saturating_add(delta.unsigned_abs())
        };
        self.set_cursor(target);
    }

    pub(crate) fn set_cursor(&mut self, target: usize) {
        let previous = self.cursor;
        self.cursor = target;
        self.clamp_cursor();
        if self.cursor != previous {
            self.mark_dirty();
        }
    }

    pub(crate) fn show_preview(&mut self, mut rows: Vec<PendingRow>) {
        rows.truncate(MAX_PREVIEW_ROWS);
        self.preview_rows = rows;
        self.preview_visible = true;
        self.mark_dirty();
    }

    pub(crate) fn clear_preview(&mut self) {
        self.preview_rows.clear();
        self.preview_visible = false;
        self.mark_dirty();
    }

    fn clamp_cursor(&mut self) {
        let len = self.filtered_records().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

use roster_logging::{roster_debug, roster_error, roster_warn};

use crate::{AppState, Effect, Msg, RecordId};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted | Msg::ReloadRequested => vec![Effect::LoadRecords],
        Msg::RecordsLoaded(records) => {
            roster_debug!("Loaded {} records", records.len());
            state.replace_records(records);
            Vec::new()
        }
        Msg::RecordsLoadFailed(reason) => {
            roster_error!("An error occurred: {}", reason);
            Vec::new()
        }
        Msg::DeleteRequested(id) => request_delete(&mut state, vec![id]),
        Msg::DeleteSelectedRequested => {
            let ids = state.selected_ids_in_order();
            if ids.is_empty() {
                return (state, Vec::new());
            }
            request_delete(&mut state, ids)
        }
        Msg::RecordsDeleted { ids, failed } => {
            // Pruned even when the server refused: the list mirrors what was requested.
            for (id, reason) in &failed {
                roster_error!("Failed to delete record {}: {}", id, reason);
            }
            prune(&mut state, &ids)
        }
        Msg::ToggleSelect(id) => {
            state.toggle_select(id);
            Vec::new()
        }
        Msg::ToggleSelectAll => {
            state.toggle_select_all();
            Vec::new()
        }
        Msg::SearchChanged(query) => {
            state.set_search_query(query);
            Vec::new()
        }
        Msg::LevelFilterChanged(level) => {
            state.set_level_filter(level);
            Vec::new()
        }
        Msg::CycleLevelFilter => {
            let next = state.filter().level.next();
            state.set_level_filter(next);
            Vec::new()
        }
        Msg::CursorMoved(delta) => {
            state.move_cursor(delta);
            Vec::new()
        }
        Msg::CursorTo(row) => {
            state.set_cursor(row);
            Vec::new()
        }
        Msg::FileChosen(Some(path)) => vec![Effect::ParseSpreadsheet { path }],
        Msg::FileChosen(None) => Vec::new(),
        Msg::SpreadsheetParsed(rows) => {
            roster_debug!("Parsed {} spreadsheet rows", rows.len());
            state.show_preview(rows);
            Vec::new()
        }
        Msg::SpreadsheetFailed(reason) => {
            roster_error!("Could not read spreadsheet: {}", reason);
            Vec::new()
        }
        Msg::ConfirmInsertRequested => {
            if state.preview_rows().is_empty() {
                Vec::new()
            } else {
                vec![Effect::InsertRecords(state.preview_rows().to_vec())]
            }
        }
        Msg::RecordsInserted(rows) => {
            let before = state.records().len();
            state.append_inserted(rows);
            state.clear_preview();
            reload_if_count_changed(&state, before)
        }
        Msg::InsertFailed(reason) => {
            roster_error!("Error inserting data: {}", reason);
            Vec::new()
        }
        Msg::PreviewDismissed => {
            if state.preview_visible() {
                state.clear_preview();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Provisional ids never reached the server, so they are pruned locally
/// straight away; the rest go out as one sequential delete run.
fn request_delete(state: &mut AppState, ids: Vec<RecordId>) -> Vec<Effect> {
    let (local, remote): (Vec<_>, Vec<_>) = ids.into_iter().partition(RecordId::is_provisional);

    let mut effects = Vec::new();
    if !local.is_empty() {
        roster_warn!("Dropping {} provisional records without a request", local.len());
        effects = prune(state, &local);
    }
    if !remote.is_empty() {
        // The delete run ends in a reload of its own.
        effects = vec![Effect::DeleteRecords(remote)];
    }
    effects
}

fn prune(state: &mut AppState, ids: &[RecordId]) -> Vec<Effect> {
    let before = state.records().len();
    state.remove_records(ids);
    reload_if_count_changed(state, before)
}

fn reload_if_count_changed(state: &AppState, before: usize) -> Vec<Effect> {
    if state.records().len() != before {
        vec![Effect::LoadRecords]
    } else {
        Vec::new()
    }
}

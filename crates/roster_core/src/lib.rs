//! Roster core: pure state machine and view-model helpers for the
//! employee record list.
mod effect;
mod filter;
mod msg;
mod record;
mod selection;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use filter::{filter_records, FilterState};
pub use msg::Msg;
pub use record::{Level, LevelFilter, PendingRow, Record, RecordId};
pub use selection::Selection;
pub use state::{AppState, MAX_PREVIEW_ROWS};
pub use update::update;
pub use view_model::{AppViewModel, PreviewView, RecordRowView, NO_RECORDS_MESSAGE, PREVIEW_HEADING};

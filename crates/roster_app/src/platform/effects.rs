use roster_core::{Effect, Msg};
use roster_engine::{EngineEvent, EngineHandle};
use roster_logging::{roster_info, roster_warn};

/// Hands core effects to the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadRecords => {
                    roster_info!("LoadRecords");
                    self.engine.load();
                }
                Effect::DeleteRecords(ids) => {
                    roster_info!("DeleteRecords count={}", ids.len());
                    self.engine.delete(ids);
                }
                Effect::InsertRecords(rows) => {
                    roster_info!("InsertRecords count={}", rows.len());
                    self.engine.insert(rows);
                }
                Effect::ParseSpreadsheet { path } => {
                    roster_info!("ParseSpreadsheet path={:?}", path);
                    self.engine.parse_spreadsheet(path);
                }
            }
        }
    }

    /// Messages for every engine event that arrived since the last call.
    pub fn drain(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            msgs.push(event_to_msg(event));
        }
        msgs
    }
}

pub(crate) fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::RecordsLoaded(Ok(records)) => Msg::RecordsLoaded(records),
        EngineEvent::RecordsLoaded(Err(err)) => Msg::RecordsLoadFailed(err.message),
        EngineEvent::RecordsDeleted(report) => {
            let succeeded = report.succeeded().count();
            if succeeded == report.requested.len() {
                roster_info!("Deleted {} records", succeeded);
            } else {
                roster_warn!(
                    "Deleted {} of {} records; {} failed",
                    succeeded,
                    report.requested.len(),
                    report.failed.len()
                );
            }
            Msg::RecordsDeleted {
                ids: report.requested,
                failed: report
                    .failed
                    .into_iter()
                    .map(|(id, err)| (id, err.to_string()))
                    .collect(),
            }
        }
        EngineEvent::RecordsInserted { rows, result } => match result {
            Ok(()) => Msg::RecordsInserted(rows),
            Err(err) => Msg::InsertFailed(err.to_string()),
        },
        EngineEvent::SpreadsheetParsed(Ok(rows)) => Msg::SpreadsheetParsed(rows),
        EngineEvent::SpreadsheetParsed(Err(err)) => Msg::SpreadsheetFailed(err.to_string()),
    }
}

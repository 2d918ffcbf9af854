use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use roster_core::{PendingRow, RecordId};
use roster_logging::{roster_debug, roster_info};

use crate::client::{delete_sequentially, ClientSettings, RecordsClient, ReqwestRecordsClient};
use crate::spreadsheet::read_spreadsheet;
use crate::EngineEvent;

enum EngineCommand {
    Load,
    Delete(Vec<RecordId>),
    Insert(Vec<PendingRow>),
    ParseSpreadsheet(PathBuf),
}

/// Runs record requests and spreadsheet parsing on a background thread.
///
/// Commands are executed one at a time in the order they were sent, so a
/// reload queued after a delete run observes the deletes.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> io::Result<Self> {
        roster_info!("Records endpoint base: {}", settings.base_url);
        Self::with_client(Arc::new(ReqwestRecordsClient::new(settings)))
    }

    pub fn with_client(client: Arc<dyn RecordsClient>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("roster-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let event = runtime.block_on(handle_command(client.as_ref(), command));
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
                roster_debug!("Engine thread exiting");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn load(&self) {
        self.send(EngineCommand::Load);
    }

    pub fn delete(&self, ids: Vec<RecordId>) {
        self.send(EngineCommand::Delete(ids));
    }

    pub fn insert(&self, rows: Vec<PendingRow>) {
        self.send(EngineCommand::Insert(rows));
    }

    pub fn parse_spreadsheet(&self, path: PathBuf) {
        self.send(EngineCommand::ParseSpreadsheet(path));
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(client: &dyn RecordsClient, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Load => EngineEvent::RecordsLoaded(client.fetch_records().await),
        EngineCommand::Delete(ids) => {
            EngineEvent::RecordsDeleted(delete_sequentially(client, &ids).await)
        }
        EngineCommand::Insert(rows) => {
            let result = client.insert_records(&rows).await;
            EngineEvent::RecordsInserted { rows, result }
        }
        EngineCommand::ParseSpreadsheet(path) => {
            EngineEvent::SpreadsheetParsed(read_spreadsheet(&path))
        }
    }
}

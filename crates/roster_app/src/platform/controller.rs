use std::path::PathBuf;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use roster_core::{AppState, Msg};
use roster_logging::roster_trace;

use super::input::{InputOutcome, LineInput};

const PAGE_ROWS: isize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browse,
    Search,
    FilePrompt,
}

/// What the terminal should show for an active text prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptView {
    pub mode: Mode,
    pub text: String,
    pub cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Quit,
    Send(Vec<Msg>),
}

/// Maps key presses to messages. Owns the only state the core does not:
/// which text prompt, if any, has the keyboard.
#[derive(Debug, Default)]
pub struct Controller {
    mode: Mode,
    input: LineInput,
}

impl Controller {
    pub fn prompt(&self) -> Option<PromptView> {
        match self.mode {
            Mode::Browse => None,
            Mode::Search | Mode::FilePrompt => Some(PromptView {
                mode: self.mode,
                text: self.input.text().to_string(),
                cursor: self.input.cursor(),
            }),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> KeyOutcome {
        // Ctrl-C quits from every mode, including the text prompts.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyOutcome::Quit;
        }
        let outcome = match self.mode {
            Mode::Browse => self.browse_key(key, state),
            Mode::Search => self.search_key(key),
            Mode::FilePrompt => self.file_key(key),
        };
        roster_trace!("Mapped: {key:?} => {outcome:?}");
        outcome
    }

    fn browse_key(&mut self, key: KeyEvent, state: &AppState) -> KeyOutcome {
        let msg = match key.code {
            KeyCode::Char('q') => return KeyOutcome::Quit,
            KeyCode::Up | KeyCode::Char('k') => Some(Msg::CursorMoved(-1)),
            KeyCode::Down | KeyCode::Char('j') => Some(Msg::CursorMoved(1)),
            KeyCode::PageUp => Some(Msg::CursorMoved(-PAGE_ROWS)),
            KeyCode::PageDown => Some(Msg::CursorMoved(PAGE_ROWS)),
            KeyCode::Home => Some(Msg::CursorTo(0)),
            KeyCode::End => Some(Msg::CursorTo(usize::MAX)),
            KeyCode::Char(' ') => state.highlighted_id().map(Msg::ToggleSelect),
            KeyCode::Char('a') => Some(Msg::ToggleSelectAll),
            KeyCode::Char('d') => state.highlighted_id().map(Msg::DeleteRequested),
            KeyCode::Char('D') => Some(Msg::DeleteSelectedRequested),
            KeyCode::Char('l') => Some(Msg::CycleLevelFilter),
            KeyCode::Char('c') => Some(Msg::ConfirmInsertRequested),
            KeyCode::Char('x') => Some(Msg::PreviewDismissed),
            KeyCode::Char('r') => Some(Msg::ReloadRequested),
            KeyCode::Char('/') => {
                self.mode = Mode::Search;
                self.input.set(&state.filter().search_query);
                None
            }
            KeyCode::Char('u') => {
                self.mode = Mode::FilePrompt;
                self.input.clear();
                None
            }
            _ => None,
        };
        KeyOutcome::Send(msg.into_iter().collect())
    }

    /// Every edit is applied to the filter immediately.
    fn search_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match self.input.read(key) {
            InputOutcome::Edited => KeyOutcome::Send(vec![Msg::SearchChanged(
                self.input.text().to_string(),
            )]),
            InputOutcome::Submitted => {
                self.mode = Mode::Browse;
                KeyOutcome::Send(Vec::new())
            }
            InputOutcome::Cancelled => {
                self.mode = Mode::Browse;
                self.input.clear();
                KeyOutcome::Send(vec![Msg::SearchChanged(String::new())])
            }
            InputOutcome::Moved | InputOutcome::Ignored => KeyOutcome::Send(Vec::new()),
        }
    }

    fn file_key(&mut self, key: KeyEvent) -> KeyOutcome {
        let chosen = match self.input.read(key) {
            InputOutcome::Submitted => {
                let raw = self.input.text().trim();
                (!raw.is_empty()).then(|| PathBuf::from(raw))
            }
            InputOutcome::Cancelled => None,
            _ => return KeyOutcome::Send(Vec::new()),
        };
        self.mode = Mode::Browse;
        self.input.clear();
        KeyOutcome::Send(vec![Msg::FileChosen(chosen)])
    }
}

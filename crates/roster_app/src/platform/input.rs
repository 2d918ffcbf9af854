use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press did to the line being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Edited,
    Moved,
    Submitted,
    Cancelled,
    Ignored,
}

/// Single-line text editor for the search box and the file prompt.
/// The cursor counts characters, not bytes.
#[derive(Debug, Default, Clone)]
pub struct LineInput {
    text: String,
    cursor: usize,
}

impl LineInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn read(&mut self, key: KeyEvent) -> InputOutcome {
        match key.code {
            KeyCode::Enter => InputOutcome::Submitted,
            KeyCode::Esc => InputOutcome::Cancelled,
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_to(self.cursor.saturating_sub(1)),
            KeyCode::Right => self.move_to(self.cursor + 1),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(usize::MAX),
            KeyCode::Char(chr) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.text.insert(self.byte_pos(self.cursor), chr);
                self.cursor += 1;
                InputOutcome::Edited
            }
            _ => InputOutcome::Ignored,
        }
    }

    fn backspace(&mut self) -> InputOutcome {
        if self.cursor == 0 {
            return InputOutcome::Ignored;
        }
        self.cursor -= 1;
        self.text.remove(self.byte_pos(self.cursor));
        InputOutcome::Edited
    }

    fn delete(&mut self) -> InputOutcome {
        if self.cursor >= self.text.chars().count() {
            return InputOutcome::Ignored;
        }
        self.text.remove(self.byte_pos(self.cursor));
        InputOutcome::Edited
    }

    fn move_to(&mut self, target: usize) -> InputOutcome {
        let target = target.min(self.text.chars().count());
        if target == self.cursor {
            return InputOutcome::Ignored;
        }
        self.cursor = target;
        InputOutcome::Moved
    }

    fn byte_pos(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut LineInput, text: &str) {
        for chr in text.chars() {
            input.read(key(KeyCode::Char(chr)));
        }
    }

    #[test]
    fn typing_inserts_at_cursor() {
        let mut input = LineInput::default();
        type_str(&mut input, "ac");
        input.read(key(KeyCode::Left));
        assert_eq!(input.read(key(KeyCode::Char('b'))), InputOutcome::Edited);
        assert_eq!(input.text(), "abc");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn backspace_removes_char_before_cursor() {
        let mut input = LineInput::default();
        input.set("héllo");
        input.read(key(KeyCode::Left));
        input.read(key(KeyCode::Left));
        input.read(key(KeyCode::Left));
        assert_eq!(input.read(key(KeyCode::Backspace)), InputOutcome::Edited);
        assert_eq!(input.text(), "hllo");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn backspace_at_start_is_ignored() {
        let mut input = LineInput::default();
        input.set("x");
        input.read(key(KeyCode::Home));
        assert_eq!(input.read(key(KeyCode::Backspace)), InputOutcome::Ignored);
        assert_eq!(input.text(), "x");
    }

    #[test]
    fn enter_and_escape_report_outcome_without_editing() {
        let mut input = LineInput::default();
        input.set("staff.xlsx");
        assert_eq!(input.read(key(KeyCode::Enter)), InputOutcome::Submitted);
        assert_eq!(input.read(key(KeyCode::Esc)), InputOutcome::Cancelled);
        assert_eq!(input.text(), "staff.xlsx");
    }

    #[test]
    fn control_chords_are_ignored() {
        let mut input = LineInput::default();
        let outcome = input.read(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(outcome, InputOutcome::Ignored);
        assert!(input.text().is_empty());
    }
}

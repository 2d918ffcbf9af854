use ratatui::layout::{Constraint, Position, Rect};
use ratatui::style::{Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;
use roster_core::{AppViewModel, PreviewView, RecordRowView};

use super::constants::*;
use super::layout::{split, Areas};
use crate::platform::controller::{Mode, PromptView};

pub fn draw(frame: &mut Frame, view: &AppViewModel, prompt: Option<&PromptView>) {
    let areas = split(
        frame.area(),
        view.preview.as_ref().map(|preview| preview.rows.len()),
    );

    draw_search(frame, areas.search, view, prompt);
    draw_level(frame, areas.level, view);
    if let Some(preview) = &view.preview {
        draw_preview(frame, areas.preview, preview);
    }
    draw_records(frame, areas.table, view);
    draw_status(frame, &areas, view, prompt);
}

fn draw_search(frame: &mut Frame, area: Rect, view: &AppViewModel, prompt: Option<&PromptView>) {
    let editing = prompt.filter(|prompt| prompt.mode == Mode::Search);
    let block = Block::bordered().title(SEARCH_TITLE);
    let block = if editing.is_some() {
        block.yellow()
    } else {
        block
    };

    let text = match editing {
        Some(prompt) => Line::from(prompt.text.clone()),
        None if view.search_query.is_empty() => Line::from(SEARCH_PLACEHOLDER.dim()),
        None => Line::from(view.search_query.clone()),
    };
    frame.render_widget(Paragraph::new(text).block(block), area);

    if let Some(prompt) = editing {
        frame.set_cursor_position(Position::new(
            area.x + 1 + cursor_column(prompt),
            area.y + 1,
        ));
    }
}

fn draw_level(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let block = Block::bordered().title(LEVEL_TITLE);
    frame.render_widget(
        Paragraph::new(Line::from(view.level_filter.label())).block(block),
        area,
    );
}

fn draw_preview(frame: &mut Frame, area: Rect, preview: &PreviewView) {
    let rows = preview.rows.iter().map(|row| {
        Row::new(vec![
            row.name.clone(),
            row.position.clone(),
            row.level.to_string(),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Percentage(20),
        ],
    )
    .header(Row::new(PREVIEW_HEADER).bold())
    .block(
        Block::bordered()
            .title(Line::from(format!(" {} ", preview.heading)).bold())
            .title_bottom(Line::from(PREVIEW_HINT.green()).centered()),
    );
    frame.render_widget(table, area);
}

fn draw_records(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let header_check = if view.all_selected { CHECKED } else { UNCHECKED };
    let mut header = TABLE_HEADER;
    header[0] = header_check;

    let rows: Vec<Row> = match view.empty_message {
        Some(message) => vec![Row::new(vec![Cell::from(""), Cell::from(message.italic())])],
        None => view.rows.iter().map(record_row).collect(),
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Length(8),
            Constraint::Fill(1),
        ],
    )
    .header(Row::new(header).bold())
    .block(Block::bordered().title(Line::from(TITLE.bold()).centered()))
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default().with_selected(view.cursor);
    frame.render_stateful_widget(table, area, &mut state);
}

fn record_row(row: &RecordRowView) -> Row<'static> {
    let check = if row.selected { CHECKED } else { UNCHECKED };
    let action = if row.provisional {
        "(saving)".to_string()
    } else {
        row.edit_path.clone()
    };
    let cells = vec![
        Cell::from(check),
        Cell::from(row.name.clone()),
        Cell::from(row.position.clone()),
        Cell::from(row.level.to_string()),
        Cell::from(action),
    ];
    let styled = Row::new(cells);
    if row.provisional {
        styled.dim()
    } else {
        styled
    }
}

fn draw_status(frame: &mut Frame, areas: &Areas, view: &AppViewModel, prompt: Option<&PromptView>) {
    let area = areas.status;
    if let Some(prompt) = prompt.filter(|prompt| prompt.mode == Mode::FilePrompt) {
        let line = Line::from(vec![UPLOAD_PROMPT.yellow(), prompt.text.clone().into()]);
        frame.render_widget(Paragraph::new(line), area);
        let label_width = Line::from(UPLOAD_PROMPT).width() as u16;
        frame.set_cursor_position(Position::new(
            area.x + label_width + cursor_column(prompt),
            area.y,
        ));
        return;
    }

    let counts = format!(
        " {} shown / {} records / {} selected ",
        view.rows.len(),
        view.total_records,
        view.selected_count
    );
    let line = Line::from(vec![Span::from(counts).blue().bold(), KEY_HINTS.dim()]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Display columns taken by the prompt text left of the cursor.
fn cursor_column(prompt: &PromptView) -> u16 {
    let before: String = prompt.text.chars().take(prompt.cursor).collect();
    Line::from(before).width() as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use roster_core::{update, AppState, Level, Msg, PendingRow, Record, RecordId};

    fn screen(view: &AppViewModel, prompt: Option<&PromptView>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, view, prompt)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn empty_list_shows_placeholder_texts() {
        let text = screen(&AppState::new().view(), None);
        assert!(text.contains("No records found"));
        assert!(text.contains(SEARCH_PLACEHOLDER));
        assert!(text.contains("All Levels"));
    }

    #[test]
    fn rows_and_preview_are_drawn() {
        let (state, _) = update(
            AppState::new(),
            Msg::RecordsLoaded(vec![Record {
                id: RecordId::new("42"),
                name: "Ann".into(),
                position: "Dev".into(),
                level: Level::Junior,
            }]),
        );
        let (state, _) = update(
            state,
            Msg::SpreadsheetParsed(vec![PendingRow {
                name: "Zoe".into(),
                position: "QA".into(),
                level: Level::Intern,
            }]),
        );

        let text = screen(&state.view(), None);
        assert!(text.contains("Ann"));
        assert!(text.contains("/edit/42"));
        assert!(text.contains("Preview (First 10 Records)"));
        assert!(text.contains("Zoe"));
        assert!(text.contains("1 shown / 1 records / 0 selected"));
    }

    #[test]
    fn file_prompt_replaces_status_line() {
        let prompt = PromptView {
            mode: Mode::FilePrompt,
            text: "staff.xlsx".into(),
            cursor: 10,
        };
        let text = screen(&AppState::new().view(), Some(&prompt));
        assert!(text.contains("Upload .xlsx/.xls file: staff.xlsx"));
    }

    #[test]
    fn cursor_column_counts_display_width() {
        let prompt = PromptView {
            mode: Mode::Search,
            text: "日本a".into(),
            cursor: 2,
        };
        assert_eq!(cursor_column(&prompt), 4);

        let ascii = PromptView {
            mode: Mode::Search,
            text: "abc".into(),
            cursor: 3,
        };
        assert_eq!(cursor_column(&ascii), 3);
    }

    #[test]
    fn file_prompt_cursor_sits_after_wide_text() {
        let prompt = PromptView {
            mode: Mode::FilePrompt,
            text: "名簿.xlsx".into(),
            cursor: 2,
        };
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| draw(frame, &AppState::new().view(), Some(&prompt)))
            .unwrap();
        let cursor = terminal.get_cursor_position().unwrap();
        assert_eq!(cursor.x, UPLOAD_PROMPT.len() as u16 + 4);
        assert_eq!(cursor.y, 29);
    }
}

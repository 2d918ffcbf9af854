use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub search: Rect,
    pub level: Rect,
    pub preview: Rect,
    pub table: Rect,
    pub status: Rect,
}

/// Borders plus heading row around the preview rows.
const PREVIEW_CHROME: u16 = 3;

pub fn split(area: Rect, preview_rows: Option<usize>) -> Areas {
    let preview_height = preview_rows
        .map(|rows| rows as u16 + PREVIEW_CHROME)
        .unwrap_or(0);
    let [filters, preview, table, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(preview_height),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    // Search box takes two thirds, the level drop-down the rest.
    let [search, level] =
        Layout::horizontal([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)]).areas(filters);

    Areas {
        search,
        level,
        preview,
        table,
        status,
    }
}

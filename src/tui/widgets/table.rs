//! Resource table
//!
//! Header row plus one line per resource. Cells are padded by display
//! width so wide characters don't shift the columns.

use ratatui::{
    style::Modifier,
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
};

use crate::tui::theme::Theme;
use crate::tui::unicode::pad_to_width;

/// One rendered row: the cells plus the status used for coloring
pub struct TableRow {
    pub cells: Vec<String>,
    pub status: String,
}

/// Build the table and its scroll state.
///
/// `widths` and `headers` must be the same length as each row's cells; the
/// last column of every row is colored by its status.
pub fn resource_table<'a>(
    headers: &[&str],
    widths: &[u16],
    rows: &[TableRow],
    selected: Option<usize>,
    theme: &Theme,
) -> (Line<'a>, List<'a>, ListState) {
    let header = Line::from(
        headers
            .iter()
            .zip(widths)
            .map(|(h, w)| {
                Span::styled(
                    pad_to_width(h, *w as usize + 1),
                    theme.text_secondary_style().add_modifier(Modifier::BOLD),
                )
            })
            .collect::<Vec<_>>(),
    );

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let last = row.cells.len().saturating_sub(1);
            let spans: Vec<Span> = row
                .cells
                .iter()
                .zip(widths)
                .enumerate()
                .map(|(i, (cell, w))| {
                    let text = pad_to_width(cell, *w as usize + 1);
                    if i == last {
                        Span::styled(text, theme.status_style(&row.status))
                    } else {
                        Span::styled(text, theme.text_style())
                    }
                })
                .collect();
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(theme.highlight_style().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(selected);
    (header, list, state)
}

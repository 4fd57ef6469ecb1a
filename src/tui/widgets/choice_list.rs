use ratatui::{
    text::Line,
    widgets::{List, ListItem, ListState},
};

use crate::tui::picker::Choice;
use crate::tui::theme::Theme;

/// Single-column list of choice labels with a cursor
pub fn choice_list<'a, T>(
    choices: &[Choice<T>],
    selected: Option<usize>,
    theme: &Theme,
) -> (List<'a>, ListState) {
    let items: Vec<ListItem> = choices
        .iter()
        .map(|c| ListItem::new(Line::styled(c.label.clone(), theme.text_style())))
        .collect();

    let list = List::new(items)
        .highlight_style(theme.highlight_style())
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(selected);
    (list, state)
}

//! TUI Widgets - UI Components
//!
//! Stateless renderers. Views own the state and pass plain slices and
//! indices in; nothing here decides what happens on a key press.

mod action_bar;
mod choice_list;
mod table;

pub use action_bar::action_bar;
pub use choice_list::choice_list;
pub use table::{resource_table, TableRow};

use ratatui::{
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::Theme;

/// Bordered panel with a padded title
pub fn panel<'a>(title: impl Into<String>, theme: &Theme, focused: bool) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title(format!(" {} ", title.into()))
}

/// Centered one-line message inside `area` (loading, empty, missing data)
pub fn placeholder(frame: &mut Frame, area: Rect, text: &str, theme: &Theme) {
    let top = area.height / 2;
    let target = Rect {
        y: area.y + top,
        height: area.height.saturating_sub(top).min(1),
        ..area
    };
    let paragraph = Paragraph::new(Line::styled(text.to_string(), theme.text_muted_style()))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, target);
}

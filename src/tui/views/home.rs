//! Root view: pick a resource section

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use super::{ClusterListView, InstanceListView, View, ViewResponse};
use crate::tui::context::Context;
use crate::tui::keymap::{help_line, Keybinding};
use crate::tui::picker::{Choice, PickerOutcome, SelectionList};
use crate::tui::theme::Theme;
use crate::tui::widgets::{choice_list, panel};

const KEYS: &[Keybinding] = &[
    Keybinding::new(KeyCode::Up, "up"),
    Keybinding::new(KeyCode::Down, "down"),
    Keybinding::new(KeyCode::Enter, "open"),
    Keybinding::new(KeyCode::Char('q'), "quit"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Instances,
    Clusters,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Instances, Section::Clusters];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Instances => "Instances",
            Section::Clusters => "Kubernetes clusters",
        }
    }

    /// The section's list view together with its first fetch
    fn open(self) -> ViewResponse {
        match self {
            Section::Instances => {
                let (view, fetch) = InstanceListView::open(());
                ViewResponse::push(view).with_effect(fetch)
            }
            Section::Clusters => {
                let (view, fetch) = ClusterListView::open(());
                ViewResponse::push(view).with_effect(fetch)
            }
        }
    }
}

pub struct HomeView {
    sections: SelectionList<Section>,
}

impl Default for HomeView {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeView {
    pub fn new() -> Self {
        let choices = Section::ALL
            .iter()
            .map(|s| Choice::new(s.label(), *s))
            .collect();
        Self {
            sections: SelectionList::new(choices),
        }
    }

    pub fn selected(&self) -> Option<Section> {
        self.sections.selected().map(|c| c.value)
    }
}

impl View for HomeView {
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = panel("Resources", theme, true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(inner);

        frame.render_widget(
            Paragraph::new(Line::styled(
                "Choose what to browse",
                theme.text_secondary_style(),
            )),
            chunks[0],
        );
        let (list, mut state) =
            choice_list(self.sections.choices(), self.sections.selected_index(), theme);
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut Context) -> ViewResponse {
        match self.sections.handle_key(key) {
            PickerOutcome::Submitted(section) => section.open(),
            // Nothing below the root to go back to
            PickerOutcome::Dismissed | PickerOutcome::None => ViewResponse::none(),
        }
    }

    fn title(&self) -> String {
        "Home".to_string()
    }

    fn help_text(&self) -> String {
        help_line(KEYS)
    }
}

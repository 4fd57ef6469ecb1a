//! Cluster update policy picker

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{Effect, FetchRequest, Message, View, ViewResponse};
use crate::api::{ResourceRef, UpdatePolicy};
use crate::tui::context::Context;
use crate::tui::keymap::{help_line, Keybinding};
use crate::tui::picker::{Choice, PickerOutcome, SelectionList};
use crate::tui::theme::Theme;
use crate::tui::widgets::{choice_list, panel};

const KEYS: &[Keybinding] = &[
    Keybinding::new(KeyCode::Up, "up"),
    Keybinding::new(KeyCode::Down, "down"),
    Keybinding::new(KeyCode::Enter, "apply"),
    Keybinding::new(KeyCode::Esc, "back"),
];

pub struct PolicyView {
    cluster: ResourceRef,
    current: UpdatePolicy,
    picker: SelectionList<UpdatePolicy>,
    pending: Option<UpdatePolicy>,
}

impl PolicyView {
    pub fn new(cluster: ResourceRef, current: UpdatePolicy) -> Self {
        let choices = UpdatePolicy::ALL
            .iter()
            .map(|p| Choice::new(p.label(), *p))
            .collect();
        Self {
            cluster,
            current,
            picker: SelectionList::new(choices).with_selected(|p| *p == current),
            pending: None,
        }
    }

    pub fn selected(&self) -> Option<UpdatePolicy> {
        self.picker.selected().map(|c| c.value)
    }
}

impl View for PolicyView {
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = panel(format!("Update policy · {}", self.cluster.name), theme, true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(inner);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Current: ", theme.text_secondary_style()),
                Span::styled(self.current.label(), theme.text_style()),
            ])),
            chunks[0],
        );

        let (list, mut state) =
            choice_list(self.picker.choices(), self.picker.selected_index(), theme);
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut Context) -> ViewResponse {
        match self.picker.handle_key(key) {
            PickerOutcome::Submitted(policy) => {
                self.pending = Some(policy);
                ViewResponse::effect(Effect::SubmitPolicy {
                    cluster: self.cluster.clone(),
                    policy,
                })
            }
            PickerOutcome::Dismissed => ViewResponse::pop(),
            PickerOutcome::None => ViewResponse::none(),
        }
    }

    fn handle_message(&mut self, msg: &Message, ctx: &mut Context) -> ViewResponse {
        match msg {
            Message::PolicyUpdated {
                cluster,
                policy,
                result,
            } if cluster.id == self.cluster.id && self.pending == Some(*policy) => match result {
                Ok(()) => {
                    self.pending = None;
                    self.current = *policy;
                    ctx.notify(format!("Update policy of {} set to {}", cluster.name, policy));
                    ViewResponse::pop().with_effect(Effect::Fetch(FetchRequest::Clusters))
                }
                Err(e) => {
                    self.pending = None;
                    ctx.notify_error(format!("Policy change failed: {}", e));
                    ViewResponse::none()
                }
            },
            _ => ViewResponse::none(),
        }
    }

    fn title(&self) -> String {
        "Update policy".to_string()
    }

    fn help_text(&self) -> String {
        help_line(KEYS)
    }
}

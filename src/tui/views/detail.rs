//! Generic resource detail view
//!
//! Shows one record and an action menu under it. The record is looked up
//! again by id every time its list is reloaded, so it can disappear (the
//! view then says so instead of showing stale fields).

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{Effect, FetchRequest, Message, View, ViewResponse};
use crate::api::{ResourceKind, ResourceRef};
use crate::tui::action_menu::{ActionMenu, Activation, Cancel, MenuAction};
use crate::tui::context::Context;
use crate::tui::keymap::{help_line, Keybinding};
use crate::tui::mode::InputMode;
use crate::tui::theme::Theme;
use crate::tui::unicode::pad_to_width;
use crate::tui::widgets::{action_bar, panel, placeholder};

const KEYS: &[Keybinding] = &[
    Keybinding::new(KeyCode::Left, "prev action"),
    Keybinding::new(KeyCode::Right, "next action"),
    Keybinding::new(KeyCode::Enter, "run"),
    Keybinding::new(KeyCode::Char('r'), "refresh"),
    Keybinding::new(KeyCode::Esc, "back"),
];

const CONFIRM_KEYS: &[Keybinding] = &[
    Keybinding::new(KeyCode::Enter, "confirm"),
    Keybinding::new(KeyCode::Esc, "cancel"),
];

/// A record that can be shown in a [`DetailView`]
pub trait DetailResource: Clone + 'static {
    /// Where the record lives (e.g. the owning cluster of a node pool)
    type Scope: Clone + 'static;
    type Action: Copy + 'static;

    fn kind() -> ResourceKind;
    fn id(&self) -> &str;
    fn resource_ref(&self) -> ResourceRef;

    /// Label / value pairs, in display order
    fn fields(&self) -> Vec<(&'static str, String)>;

    fn actions() -> Vec<MenuAction<Self::Action>>;

    /// What firing `action` does: an effect, a pushed view, or both
    fn activate(&self, scope: &Self::Scope, action: Self::Action) -> ViewResponse;

    /// Request that reloads every record of this kind in `scope`
    fn fetch(scope: &Self::Scope) -> FetchRequest;

    /// The reload result carried by `msg`, if it is one for `scope`
    fn loaded<'m>(scope: &Self::Scope, msg: &'m Message) -> Option<&'m Result<Vec<Self>, String>>;
}

pub struct DetailView<R: DetailResource> {
    scope: R::Scope,
    id: String,
    name: String,
    resource: Option<R>,
    menu: ActionMenu<R::Action>,
}

impl<R: DetailResource> DetailView<R> {
    pub fn new(scope: R::Scope, resource: R) -> Self {
        let name = resource.resource_ref().name;
        Self {
            scope,
            id: resource.id().to_string(),
            name,
            resource: Some(resource),
            menu: ActionMenu::new(R::actions()),
        }
    }

    pub fn resource(&self) -> Option<&R> {
        self.resource.as_ref()
    }

    pub fn menu(&self) -> &ActionMenu<R::Action> {
        &self.menu
    }

    fn is_mine(&self, r: &ResourceRef) -> bool {
        r.kind == R::kind() && r.id == self.id
    }

    fn refresh(&self) -> ViewResponse {
        ViewResponse::effect(Effect::Fetch(R::fetch(&self.scope)))
    }

    fn activate(&mut self) -> ViewResponse {
        let Some(resource) = &self.resource else {
            return ViewResponse::none();
        };
        match self.menu.activate() {
            Activation::Fire(action) => resource.activate(&self.scope, action),
            Activation::Armed | Activation::None => ViewResponse::none(),
        }
    }
}

impl<R: DetailResource> View for DetailView<R> {
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = panel(self.title(), theme, true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(resource) = &self.resource else {
            placeholder(frame, inner, "No data available", theme);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let lines: Vec<Line> = resource
            .fields()
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(pad_to_width(label, 16), theme.text_secondary_style()),
                    Span::styled(value, theme.text_style()),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), chunks[0]);

        let armed = self.menu.is_awaiting_confirm();
        frame.render_widget(
            Paragraph::new(action_bar(
                self.menu.actions(),
                self.menu.selected_index(),
                armed,
                theme,
            )),
            chunks[1],
        );

        if armed {
            if let Some(action) = self.menu.selected() {
                let prompt = format!(
                    "{} {}? Press Enter again to confirm, Esc to cancel",
                    action.label, self.name
                );
                frame.render_widget(
                    Paragraph::new(Line::styled(prompt, theme.danger_style())),
                    chunks[2],
                );
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut Context) -> ViewResponse {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.menu.move_left();
                ViewResponse::none()
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.menu.move_right();
                ViewResponse::none()
            }
            KeyCode::Enter => self.activate(),
            KeyCode::Char('r') if !self.menu.is_awaiting_confirm() => self.refresh(),
            KeyCode::Esc | KeyCode::Char('q') => match self.menu.cancel() {
                Cancel::Disarmed => ViewResponse::none(),
                Cancel::Leave => ViewResponse::pop(),
            },
            _ => ViewResponse::none(),
        }
    }

    fn handle_message(&mut self, msg: &Message, ctx: &mut Context) -> ViewResponse {
        if let Some(result) = R::loaded(&self.scope, msg) {
            match result {
                Ok(items) => {
                    self.resource = items.iter().find(|r| r.id() == self.id).cloned();
                    if self.resource.is_none() {
                        tracing::debug!("{} {} no longer listed", R::kind().label(), self.id);
                    }
                }
                Err(e) => ctx.notify_error(format!("Refresh failed: {}", e)),
            }
            return ViewResponse::none();
        }

        match msg {
            Message::ActionCompleted {
                resource,
                action,
                result,
            } if self.is_mine(resource) => match result {
                Ok(()) => {
                    ctx.notify(format!("{} requested for {}", action.label(), resource));
                    self.refresh()
                }
                Err(e) => {
                    ctx.notify_error(format!("{} failed: {}", action.label(), e));
                    ViewResponse::none()
                }
            },
            Message::Deleted { resource, result } if self.is_mine(resource) => match result {
                Ok(()) => {
                    ctx.notify(format!("Deleted {}", resource));
                    ViewResponse::pop().with_effect(Effect::Fetch(R::fetch(&self.scope)))
                }
                Err(e) => {
                    ctx.notify_error(format!("Delete failed: {}", e));
                    ViewResponse::none()
                }
            },
            _ => ViewResponse::none(),
        }
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn help_text(&self) -> String {
        if self.menu.is_awaiting_confirm() {
            help_line(CONFIRM_KEYS)
        } else {
            help_line(KEYS)
        }
    }

    fn input_mode(&self) -> InputMode {
        if self.menu.is_awaiting_confirm() {
            InputMode::Confirm
        } else {
            InputMode::Normal
        }
    }
}

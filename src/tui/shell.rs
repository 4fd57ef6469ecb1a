//! Transition engine
//!
//! Owns the navigation stack and the shared context. Keys and messages go to
//! the active view; the response's transition is applied before anything
//! else is processed, and its effect is handed back to the caller to run.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::context::Context;
use super::keymap::{help_line, GLOBAL_KEYS};
use super::mode::InputMode;
use super::stack::NavigationStack;
use super::theme::Theme;
use super::unicode::truncate_to_width;
use super::views::{Effect, Message, View, ViewResponse};

pub struct Shell {
    stack: NavigationStack,
    context: Context,
    should_quit: bool,
}

impl Shell {
    pub fn new(root: Box<dyn View>, context: Context) -> Self {
        Self {
            stack: NavigationStack::new(root),
            context,
            should_quit: false,
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn active_title(&self) -> String {
        self.stack.active().title()
    }

    pub fn active_mode(&self) -> InputMode {
        self.stack.active().input_mode()
    }

    pub fn breadcrumb(&self) -> Vec<String> {
        self.stack.breadcrumb()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Dispatch a key to the active view
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }
        if key.code == KeyCode::Char('q')
            && self.stack.is_root()
            && !self.active_mode().captures_input()
        {
            self.should_quit = true;
            return None;
        }

        let response = self.stack.active_mut().handle_key(key, &mut self.context);
        self.apply(response)
    }

    /// Deliver an effect's result to whichever view is active now
    pub fn handle_message(&mut self, msg: Message) -> Option<Effect> {
        let response = self
            .stack
            .active_mut()
            .handle_message(&msg, &mut self.context);
        if response.is_none() {
            tracing::trace!("{} ignored message {:?}", self.active_title(), msg);
        }
        self.apply(response)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.context.set_viewport(width, height);
    }

    pub fn tick(&mut self, now: Instant) {
        self.context.expire_notification(now);
    }

    fn apply(&mut self, response: ViewResponse) -> Option<Effect> {
        if let Some(transition) = response.transition {
            self.stack.apply(transition);
        }
        response.effect
    }

    /// Header, active view, footer
    pub fn render(&self, frame: &mut Frame, theme: &Theme, now: Instant) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0], theme);
        self.stack.active().render(frame, chunks[1], theme);
        self.render_footer(frame, chunks[2], theme, now);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mode = self.active_mode();
        let crumbs = self.breadcrumb().join(" › ");
        let line = Line::from(vec![
            Span::styled(
                " cloudnav ",
                Style::default()
                    .fg(theme.background)
                    .bg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(self.context.project_name(), theme.highlight_style()),
            Span::styled(" │ ", theme.text_muted_style()),
            Span::styled(crumbs, theme.text_style()),
            Span::styled(format!("  [{}]", mode.indicator()), theme.text_muted_style()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, theme: &Theme, now: Instant) {
        let width = area.width as usize;
        let line = match self.context.notification(now) {
            Some(n) => Line::from(Span::styled(
                truncate_to_width(&format!(" {}", n.text), width),
                theme.notification_style(n.level),
            )),
            None => {
                let help = format!(
                    " {} · {}",
                    self.stack.active().help_text(),
                    help_line(GLOBAL_KEYS)
                );
                Line::from(Span::styled(
                    truncate_to_width(&help, width),
                    theme.text_muted_style(),
                ))
            }
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

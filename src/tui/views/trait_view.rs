//! View trait for polymorphic TUI views
//!
//! Every screen on the navigation stack implements this trait.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use super::{Message, ViewResponse};
use crate::tui::context::Context;
use crate::tui::mode::InputMode;
use crate::tui::theme::Theme;

/// Trait for TUI views
///
/// `render` must only read the view's own state, so redrawing at a new size
/// never needs fresh data. The handlers may change the view and the shared
/// [`Context`], and report stack changes through [`ViewResponse`] instead of
/// touching the stack.
pub trait View {
    /// Render the view into `area`
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Handle a key event
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context) -> ViewResponse;

    /// Handle the result of a deferred effect.
    ///
    /// The message may belong to a view that has since been popped; views
    /// ignore anything they don't recognize.
    fn handle_message(&mut self, _msg: &Message, _ctx: &mut Context) -> ViewResponse {
        ViewResponse::none()
    }

    /// Title for the header breadcrumb
    fn title(&self) -> String;

    /// Contextual help for the footer
    fn help_text(&self) -> String;

    /// Current input mode
    fn input_mode(&self) -> InputMode {
        InputMode::Normal
    }
}

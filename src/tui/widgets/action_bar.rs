use ratatui::text::{Line, Span};

use crate::tui::action_menu::MenuAction;
use crate::tui::theme::Theme;

/// Horizontal row of `[ Action ]` buttons.
///
/// The selected button is highlighted, or painted with the danger style
/// while it waits for confirmation.
pub fn action_bar<'a, A>(
    actions: &[MenuAction<A>],
    selected: usize,
    armed: bool,
    theme: &Theme,
) -> Line<'a> {
    let mut spans = Vec::with_capacity(actions.len() * 2);
    for (i, action) in actions.iter().enumerate() {
        let style = match (i == selected, armed) {
            (true, true) => theme.danger_style(),
            (true, false) => theme.highlight_style(),
            (false, _) => theme.text_secondary_style(),
        };
        let marker = if action.requires_confirm { "!" } else { "" };
        spans.push(Span::styled(
            format!("[ {}{} ]", action.label, marker),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

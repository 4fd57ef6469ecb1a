//! Keybindings and help text
//!
//! Views describe their keys as [`Keybinding`] tables; the footer help line
//! is generated from them so it never drifts from what the view handles.

use crossterm::event::{KeyCode, KeyModifiers};

/// Keybinding definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keybinding {
    /// Key code
    pub code: KeyCode,
    /// Required modifiers (Ctrl, Shift, Alt)
    pub modifiers: KeyModifiers,
    /// Description for help display
    pub description: &'static str,
}

impl Keybinding {
    pub const fn new(code: KeyCode, description: &'static str) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
            description,
        }
    }

    pub const fn ctrl(code: KeyCode, description: &'static str) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
            description,
        }
    }
}

/// Keys the shell handles for every view
pub const GLOBAL_KEYS: &[Keybinding] = &[Keybinding::ctrl(KeyCode::Char('c'), "quit")];

/// Format keybinding for display
pub fn format_key(code: KeyCode, modifiers: KeyModifiers) -> String {
    let mut parts = Vec::new();

    if modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift");
    }

    let key = match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    parts.push(&key);
    parts.join("+")
}

/// One-line help: `key desc · key desc · ...`
pub fn help_line(bindings: &[Keybinding]) -> String {
    bindings
        .iter()
        .map(|b| format!("{} {}", format_key(b.code, b.modifiers), b.description))
        .collect::<Vec<_>>()
        .join(" · ")
}

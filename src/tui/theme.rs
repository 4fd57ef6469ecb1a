//! TUI Theme
//!
//! Provides consistent styling across all views.

use ratatui::style::{Color, Modifier, Style};

use super::context::NotificationLevel;

#[derive(Debug, Clone)]
pub struct Theme {
    // ═══════════════════════════════════════════
    // RESOURCE STATUS
    // ═══════════════════════════════════════════
    pub status_active: Color,
    pub status_pending: Color,
    pub status_stopped: Color,
    pub status_error: Color,

    // ═══════════════════════════════════════════
    // UI ELEMENTS
    // ═══════════════════════════════════════════
    pub border_normal: Color,
    pub border_focused: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub background: Color,
    pub highlight: Color,
    pub danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Status
            status_active: Color::Rgb(34, 197, 94),   // #22C55E green
            status_pending: Color::Rgb(245, 158, 11), // #F59E0B amber
            status_stopped: Color::Rgb(107, 114, 128), // #6B7280 gray
            status_error: Color::Rgb(239, 68, 68),    // #EF4444 red

            // UI elements
            border_normal: Color::Rgb(75, 85, 99),    // #4B5563 gray-600
            border_focused: Color::Rgb(99, 102, 241), // #6366F1 indigo
            text_primary: Color::Rgb(243, 244, 246),  // #F3F4F6 gray-100
            text_secondary: Color::Rgb(156, 163, 175), // #9CA3AF gray-400
            text_muted: Color::Rgb(107, 114, 128),    // #6B7280 gray-500
            background: Color::Rgb(17, 24, 39),       // #111827 gray-900
            highlight: Color::Rgb(99, 102, 241),      // #6366F1 indigo
            danger: Color::Rgb(239, 68, 68),          // #EF4444 red
        }
    }
}

impl Theme {
    /// Color for a provider status string (`ACTIVE`, `SHUTOFF`, `BUILDING`, ...)
    pub fn status_color(&self, status: &str) -> Color {
        match status.to_ascii_uppercase().as_str() {
            "ACTIVE" | "RUNNING" | "READY" => self.status_active,
            "SHUTOFF" | "STOPPED" => self.status_stopped,
            "ERROR" | "FAILED" | "DEGRADED" => self.status_error,
            _ => self.status_pending,
        }
    }

    pub fn status_style(&self, status: &str) -> Style {
        Style::default().fg(self.status_color(status))
    }

    /// Get style for panel border (focused or not)
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border_normal)
        }
    }

    pub fn notification_style(&self, level: NotificationLevel) -> Style {
        match level {
            NotificationLevel::Info => Style::default().fg(self.status_active),
            NotificationLevel::Error => Style::default()
                .fg(self.status_error)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Get style for primary text
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Get style for secondary text
    pub fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Get style for muted text
    pub fn text_muted_style(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Get style for highlighted text
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected entry that is armed for a destructive action
    pub fn danger_style(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.danger)
            .add_modifier(Modifier::BOLD)
    }
}

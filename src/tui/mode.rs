//! Input Mode
//!
//! What the active view does with plain character keys.

/// Input mode reported by the active view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal mode - navigation and commands
    #[default]
    Normal,
    /// Filter mode - typed characters edit a list filter
    Filter,
    /// Edit mode - arrow keys change field values
    Edit,
    /// A destructive action is armed and waiting for confirmation
    Confirm,
}

impl InputMode {
    /// Returns the mode indicator for the header
    pub fn indicator(&self) -> &'static str {
        match self {
            InputMode::Normal => "NORMAL",
            InputMode::Filter => "FILTER",
            InputMode::Edit => "EDIT",
            InputMode::Confirm => "CONFIRM",
        }
    }

    /// Returns true if plain characters belong to the view (no global keys)
    pub fn captures_input(&self) -> bool {
        matches!(self, InputMode::Filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_normal() {
        assert_eq!(InputMode::default(), InputMode::Normal);
    }

    #[test]
    fn test_indicator() {
        assert_eq!(InputMode::Normal.indicator(), "NORMAL");
        assert_eq!(InputMode::Filter.indicator(), "FILTER");
        assert_eq!(InputMode::Edit.indicator(), "EDIT");
        assert_eq!(InputMode::Confirm.indicator(), "CONFIRM");
    }

    #[test]
    fn test_captures_input() {
        assert!(!InputMode::Normal.captures_input());
        assert!(InputMode::Filter.captures_input());
        assert!(!InputMode::Edit.captures_input());
        assert!(!InputMode::Confirm.captures_input());
    }
}

//! Single-choice selection list
//!
//! Exactly one of N options. With no options at all the list turns into an
//! acknowledgement screen: any confirm or cancel key dismisses it.

use crossterm::event::{KeyCode, KeyEvent};

use super::cursor::Cursor;

/// A labelled option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<T> {
    pub label: String,
    pub value: T,
}

impl<T> Choice<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// What a key did to the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome<T> {
    /// Key consumed (or ignored), nothing to report
    None,
    /// Enter on a non-empty list
    Submitted(T),
    /// Leave the list without choosing
    Dismissed,
}

#[derive(Debug, Clone)]
pub struct SelectionList<T> {
    choices: Vec<Choice<T>>,
    cursor: Cursor,
}

impl<T: Clone> SelectionList<T> {
    pub fn new(choices: Vec<Choice<T>>) -> Self {
        let cursor = Cursor::for_len(choices.len());
        Self { choices, cursor }
    }

    /// Start with the cursor on the first choice matching `pred`
    pub fn with_selected(mut self, pred: impl Fn(&T) -> bool) -> Self {
        if let Some(i) = self.choices.iter().position(|c| pred(&c.value)) {
            self.cursor.first(self.choices.len());
            for _ in 0..i {
                self.cursor.next(self.choices.len());
            }
        }
        self
    }

    /// Replace the options, keeping the cursor where it still fits
    pub fn set_choices(&mut self, choices: Vec<Choice<T>>) {
        self.choices = choices;
        self.cursor.clamp(self.choices.len());
    }

    pub fn choices(&self) -> &[Choice<T>] {
        &self.choices
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.cursor.selected()
    }

    pub fn selected(&self) -> Option<&Choice<T>> {
        self.cursor.selected().and_then(|i| self.choices.get(i))
    }

    pub fn select_next(&mut self) {
        self.cursor.next(self.choices.len());
    }

    pub fn select_prev(&mut self) {
        self.cursor.prev(self.choices.len());
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerOutcome<T> {
        if self.choices.is_empty() {
            return match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char(' ') => {
                    PickerOutcome::Dismissed
                }
                _ => PickerOutcome::None,
            };
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                PickerOutcome::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                PickerOutcome::None
            }
            KeyCode::Enter => match self.selected() {
                Some(choice) => PickerOutcome::Submitted(choice.value.clone()),
                None => PickerOutcome::None,
            },
            KeyCode::Esc | KeyCode::Char('q') => PickerOutcome::Dismissed,
            _ => PickerOutcome::None,
        }
    }
}

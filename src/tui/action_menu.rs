//! Action menu with a confirmation gate
//!
//! ```text
//!          left / right (any state)
//!        ┌──────────────────────────┐
//!        ▼                          │
//!   ┌──────────┐  activate (gated)  ┌─────────────────┐
//!   │ BROWSING │ ─────────────────► │ AWAITING CONFIRM│
//!   └──────────┘ ◄───────────────── └─────────────────┘
//!     │     ▲       cancel / activate (fires)
//!     │     │
//!     └─────┘ activate (ungated, fires)
//! ```
//!
//! Cancel while browsing means "leave the view"; the caller turns that into
//! a Pop.

/// One entry of an [`ActionMenu`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuAction<A> {
    pub id: A,
    pub label: &'static str,
    pub requires_confirm: bool,
}

impl<A> MenuAction<A> {
    pub fn new(id: A, label: &'static str) -> Self {
        Self {
            id,
            label,
            requires_confirm: false,
        }
    }

    /// Same action, behind the two-step confirmation
    pub fn confirmed(id: A, label: &'static str) -> Self {
        Self {
            id,
            label,
            requires_confirm: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmState {
    #[default]
    Browsing,
    AwaitingConfirm,
}

/// Result of activating the selected action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation<A> {
    /// Nothing to do (empty menu)
    None,
    /// First activation of a gated action; waiting for the second
    Armed,
    /// The action should run now
    Fire(A),
}

/// Result of a cancel request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cancel {
    /// A pending confirmation was dropped
    Disarmed,
    /// Nothing pending; the caller should leave the view
    Leave,
}

#[derive(Debug, Clone)]
pub struct ActionMenu<A> {
    actions: Vec<MenuAction<A>>,
    selected: usize,
    state: ConfirmState,
}

impl<A: Copy> ActionMenu<A> {
    pub fn new(actions: Vec<MenuAction<A>>) -> Self {
        Self {
            actions,
            selected: 0,
            state: ConfirmState::Browsing,
        }
    }

    pub fn actions(&self) -> &[MenuAction<A>] {
        &self.actions
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&MenuAction<A>> {
        self.actions.get(self.selected)
    }

    pub fn state(&self) -> ConfirmState {
        self.state
    }

    pub fn is_awaiting_confirm(&self) -> bool {
        self.state == ConfirmState::AwaitingConfirm
    }

    /// Move selection left. Always drops a pending confirmation.
    pub fn move_left(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.state = ConfirmState::Browsing;
    }

    /// Move selection right. Always drops a pending confirmation.
    pub fn move_right(&mut self) {
        if self.selected + 1 < self.actions.len() {
            self.selected += 1;
        }
        self.state = ConfirmState::Browsing;
    }

    pub fn activate(&mut self) -> Activation<A> {
        let Some(action) = self.actions.get(self.selected) else {
            return Activation::None;
        };
        let id = action.id;
        match (action.requires_confirm, self.state) {
            (false, _) => {
                self.state = ConfirmState::Browsing;
                Activation::Fire(id)
            }
            (true, ConfirmState::Browsing) => {
                self.state = ConfirmState::AwaitingConfirm;
                Activation::Armed
            }
            (true, ConfirmState::AwaitingConfirm) => {
                self.state = ConfirmState::Browsing;
                Activation::Fire(id)
            }
        }
    }

    pub fn cancel(&mut self) -> Cancel {
        match self.state {
            ConfirmState::AwaitingConfirm => {
                self.state = ConfirmState::Browsing;
                Cancel::Disarmed
            }
            ConfirmState::Browsing => Cancel::Leave,
        }
    }
}

//! Navigation stack
//!
//! Ordered views, top is active. The root is placed at construction and can
//! only be swapped by a Replace, never popped, so there is always exactly
//! one active view.

use super::views::{Transition, View};

pub struct NavigationStack {
    views: Vec<Box<dyn View>>,
}

impl NavigationStack {
    pub fn new(root: Box<dyn View>) -> Self {
        Self { views: vec![root] }
    }

    pub fn depth(&self) -> usize {
        self.views.len()
    }

    pub fn is_root(&self) -> bool {
        self.views.len() == 1
    }

    pub fn active(&self) -> &dyn View {
        // Invariant: never empty
        self.views[self.views.len() - 1].as_ref()
    }

    pub fn active_mut(&mut self) -> &mut dyn View {
        let top = self.views.len() - 1;
        self.views[top].as_mut()
    }

    /// Titles from root to top
    pub fn breadcrumb(&self) -> Vec<String> {
        self.views.iter().map(|v| v.title()).collect()
    }

    pub fn push(&mut self, view: Box<dyn View>) {
        self.views.push(view);
    }

    /// Remove the top view. Returns `false` (and does nothing) on the root.
    pub fn pop(&mut self) -> bool {
        if self.is_root() {
            return false;
        }
        self.views.pop();
        true
    }

    /// Swap the top view for `view` in one step
    pub fn replace(&mut self, view: Box<dyn View>) {
        let top = self.views.len() - 1;
        self.views[top] = view;
    }

    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Push(view) => {
                tracing::debug!("push {}", view.title());
                self.push(view);
            }
            Transition::Replace(view) => {
                tracing::debug!("replace {} with {}", self.active().title(), view.title());
                self.replace(view);
            }
            Transition::Pop => {
                let title = self.active().title();
                if self.pop() {
                    tracing::debug!("pop {}", title);
                } else {
                    tracing::debug!("pop ignored on root view {}", title);
                }
            }
        }
    }
}

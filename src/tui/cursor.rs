//! Selection cursor over a sequence whose length can change under it.

/// Index into a sequence of `len` rows.
///
/// `Some(i)` always satisfies `i < len` for the length it was last clamped
/// to; an empty sequence has no selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    selected: Option<usize>,
}

impl Cursor {
    /// Cursor on the first row, or nothing for an empty sequence
    pub fn for_len(len: usize) -> Self {
        Self {
            selected: (len > 0).then_some(0),
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Re-clamp after the sequence changed to `len` rows.
    ///
    /// Keeps the index if it is still valid, moves to the last row
    /// otherwise, and selects the first row if nothing was selected before.
    pub fn clamp(&mut self, len: usize) {
        self.selected = match (self.selected, len) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
    }

    pub fn next(&mut self, len: usize) {
        self.clamp(len);
        if let Some(i) = self.selected {
            self.selected = Some((i + 1).min(len - 1));
        }
    }

    pub fn prev(&mut self, len: usize) {
        self.clamp(len);
        if let Some(i) = self.selected {
            self.selected = Some(i.saturating_sub(1));
        }
    }

    pub fn first(&mut self, len: usize) {
        self.selected = (len > 0).then_some(0);
    }

    pub fn last(&mut self, len: usize) {
        self.selected = len.checked_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_len() {
        assert_eq!(Cursor::for_len(0).selected(), None);
        assert_eq!(Cursor::for_len(3).selected(), Some(0));
    }

    #[test]
    fn test_next_prev_clamp_at_ends() {
        let mut c = Cursor::for_len(3);
        c.prev(3);
        assert_eq!(c.selected(), Some(0));
        c.next(3);
        c.next(3);
        c.next(3);
        assert_eq!(c.selected(), Some(2));
    }

    #[test]
    fn test_clamp_shrinks_to_last_row() {
        let mut c = Cursor::for_len(10);
        c.last(10);
        c.clamp(4);
        assert_eq!(c.selected(), Some(3));
        c.clamp(0);
        assert_eq!(c.selected(), None);
        c.clamp(2);
        assert_eq!(c.selected(), Some(0));
    }

    #[test]
    fn test_moves_on_empty_are_noops() {
        let mut c = Cursor::default();
        c.next(0);
        c.prev(0);
        c.last(0);
        assert_eq!(c.selected(), None);
    }
}

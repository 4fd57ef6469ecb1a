//! Filterable list model
//!
//! Backing rows come from the API and are never edited here. The filtered
//! view is a list of indices into the backing rows, rebuilt from scratch
//! every time the rows or the filter change.

use super::cursor::Cursor;

/// Rows that can be matched against a filter string
pub trait Searchable {
    /// Attributes the filter is matched against (e.g. name, size, region)
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match; `needle` must already be lowercase
    fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Backing rows + filter + cursor over the filtered rows
#[derive(Debug, Clone)]
pub struct FilterableList<T> {
    backing: Vec<T>,
    filter: String,
    filtered: Vec<usize>,
    cursor: Cursor,
}

impl<T> Default for FilterableList<T> {
    fn default() -> Self {
        Self {
            backing: Vec::new(),
            filter: String::new(),
            filtered: Vec::new(),
            cursor: Cursor::default(),
        }
    }
}

impl<T: Searchable> FilterableList<T> {
    pub fn new(items: Vec<T>) -> Self {
        let mut list = Self::default();
        list.set_backing(items);
        list
    }

    /// Replace the backing rows (e.g. after a re-fetch).
    ///
    /// The cursor keeps its index when that row still exists in the new
    /// filtered list and is clamped to the last row otherwise.
    pub fn set_backing(&mut self, items: Vec<T>) {
        self.backing = items;
        self.recompute();
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
        self.recompute();
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.recompute();
    }

    pub fn backspace_filter(&mut self) {
        self.filter.pop();
        self.recompute();
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        let needle = self.filter.to_lowercase();
        self.filtered = self
            .backing
            .iter()
            .enumerate()
            .filter(|(_, item)| item.matches(&needle))
            .map(|(i, _)| i)
            .collect();
        self.cursor.clamp(self.filtered.len());
    }
}

impl<T> FilterableList<T> {
    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn backing(&self) -> &[T] {
        &self.backing
    }

    /// Filtered rows in backing order
    pub fn visible(&self) -> impl Iterator<Item = &T> + '_ {
        self.filtered.iter().filter_map(|&i| self.backing.get(i))
    }

    pub fn visible_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Cursor position within the filtered rows
    pub fn selected_index(&self) -> Option<usize> {
        self.cursor.selected()
    }

    pub fn selected(&self) -> Option<&T> {
        self.cursor
            .selected()
            .and_then(|i| self.filtered.get(i))
            .and_then(|&i| self.backing.get(i))
    }

    pub fn select_next(&mut self) {
        self.cursor.next(self.filtered.len());
    }

    pub fn select_prev(&mut self) {
        self.cursor.prev(self.filtered.len());
    }

    pub fn select_first(&mut self) {
        self.cursor.first(self.filtered.len());
    }

    pub fn select_last(&mut self) {
        self.cursor.last(self.filtered.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: String,
        flavor: String,
    }

    impl Row {
        fn new(name: &str, flavor: &str) -> Self {
            Self {
                name: name.into(),
                flavor: flavor.into(),
            }
        }
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name.as_str(), self.flavor.as_str()]
        }
    }

    fn names(list: &FilterableList<Row>) -> Vec<String> {
        list.visible().map(|r| r.name.clone()).collect()
    }

    fn sample() -> Vec<Row> {
        vec![
            Row::new("web-1", "small"),
            Row::new("db-primary", "large"),
            Row::new("web-2", "small"),
            Row::new("Worker", "xlarge"),
        ]
    }

    #[test]
    fn test_empty_filter_shows_everything() {
        let list = FilterableList::new(sample());
        assert_eq!(names(&list), vec!["web-1", "db-primary", "web-2", "Worker"]);
        assert_eq!(list.selected_index(), Some(0));
    }

    #[test]
    fn test_filter_is_case_insensitive_and_ordered() {
        let mut list = FilterableList::new(sample());
        list.set_filter("W");
        assert_eq!(names(&list), vec!["web-1", "web-2", "Worker"]);
    }

    #[test]
    fn test_filter_matches_secondary_field() {
        let mut list = FilterableList::new(sample());
        list.set_filter("large");
        assert_eq!(names(&list), vec!["db-primary", "Worker"]);
    }

    #[test]
    fn test_char_edits() {
        let mut list = FilterableList::new(sample());
        list.push_filter_char('d');
        list.push_filter_char('b');
        assert_eq!(list.filter(), "db");
        assert_eq!(names(&list), vec!["db-primary"]);
        list.backspace_filter();
        assert_eq!(list.filter(), "d");
        list.clear_filter();
        assert_eq!(list.visible_len(), 4);
    }

    #[test]
    fn test_no_match_clears_selection() {
        let mut list = FilterableList::new(sample());
        list.set_filter("nothing-matches");
        assert!(list.is_empty());
        assert_eq!(list.selected_index(), None);
        assert!(list.selected().is_none());
        list.clear_filter();
        assert_eq!(list.selected_index(), Some(0));
    }

    #[test]
    fn test_refresh_keeps_valid_cursor() {
        let mut list = FilterableList::new(sample());
        list.select_next();
        list.select_next();
        assert_eq!(list.selected().unwrap().name, "web-2");

        let mut refreshed = sample();
        refreshed.push(Row::new("cache", "small"));
        list.set_backing(refreshed);
        assert_eq!(list.selected_index(), Some(2));
        assert_eq!(list.selected().unwrap().name, "web-2");
    }

    #[test]
    fn test_refresh_clamps_cursor_to_last_row() {
        let mut list = FilterableList::new(sample());
        list.select_last();
        assert_eq!(list.selected_index(), Some(3));

        list.set_backing(vec![Row::new("only", "small"), Row::new("two", "small")]);
        assert_eq!(list.selected_index(), Some(1));

        list.set_backing(Vec::new());
        assert_eq!(list.selected_index(), None);
    }

    #[test]
    fn test_refresh_respects_active_filter() {
        let mut list = FilterableList::new(sample());
        list.set_filter("web");
        list.select_last();
        list.set_backing(vec![Row::new("web-9", "small"), Row::new("db", "large")]);
        assert_eq!(names(&list), vec!["web-9"]);
        assert_eq!(list.selected_index(), Some(0));
    }

    #[test]
    fn test_selection_moves_clamp() {
        let mut list = FilterableList::new(sample());
        list.select_prev();
        assert_eq!(list.selected_index(), Some(0));
        for _ in 0..10 {
            list.select_next();
        }
        assert_eq!(list.selected_index(), Some(3));
        list.select_first();
        assert_eq!(list.selected_index(), Some(0));
    }

    fn row_strategy() -> impl Strategy<Value = Row> {
        ("[a-zA-Z0-9-]{0,8}", "[a-z]{0,5}").prop_map(|(n, f)| Row { name: n, flavor: f })
    }

    proptest! {
        #[test]
        fn prop_filtered_is_ordered_subsequence(
            rows in proptest::collection::vec(row_strategy(), 0..20),
            filter in "[a-zA-Z]{0,3}",
        ) {
            let mut list = FilterableList::new(rows.clone());
            list.set_filter(filter.clone());
            let visible: Vec<Row> = list.visible().cloned().collect();

            let mut it = rows.iter();
            for row in &visible {
                prop_assert!(it.any(|r| r == row));
            }
            let needle = filter.to_lowercase();
            let expected: Vec<Row> = rows.into_iter().filter(|r| r.matches(&needle)).collect();
            prop_assert_eq!(visible, expected);
        }

        #[test]
        fn prop_empty_filter_is_identity(rows in proptest::collection::vec(row_strategy(), 0..20)) {
            let list = FilterableList::new(rows.clone());
            let visible: Vec<Row> = list.visible().cloned().collect();
            prop_assert_eq!(visible, rows);
        }

        #[test]
        fn prop_cursor_in_bounds_after_refresh(
            first in proptest::collection::vec(row_strategy(), 0..20),
            second in proptest::collection::vec(row_strategy(), 0..20),
            moves in 0usize..25,
        ) {
            let mut list = FilterableList::new(first);
            for _ in 0..moves {
                list.select_next();
            }
            let before = list.selected_index();
            list.set_backing(second);
            let len = list.visible_len();
            match list.selected_index() {
                None => prop_assert_eq!(len, 0),
                Some(i) => {
                    prop_assert!(i < len);
                    if let Some(b) = before {
                        if b < len {
                            prop_assert_eq!(i, b);
                        } else {
                            prop_assert_eq!(i, len - 1);
                        }
                    }
                }
            }
        }
    }
}

//! Cursor-navigable list of labelled, lazily evaluated choices.

use ratatui::widgets::ListState;

/// Boxed function that produces a choice's value when it is committed.
pub type Producer<'a, T> = Box<dyn Fn() -> T + Send + Sync + 'a>;

/// Ordered `(label, producer)` pairs with a wrapping cursor.
///
/// Insertion order is display and navigation order. Producers run only
/// through [`SelectableList::invoke`]. Labels may repeat; every lookup is by
/// index.
pub struct SelectableList<'a, T> {
    /// Entries in display order.
    items: Vec<(String, Producer<'a, T>)>,
    /// Index of the highlighted entry.
    cursor: usize,
}

impl<'a, T> SelectableList<'a, T> {
    /// Empty list with the cursor at 0.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            cursor: 0,
        }
    }

    /// Append an entry at the end of the list.
    pub fn push(
        &mut self,
        label: impl Into<String>,
        producer: impl Fn() -> T + Send + Sync + 'a,
    ) {
        self.items.push((label.into(), Box::new(producer)));
    }

    /// Builder form of [`SelectableList::push`].
    pub fn with(
        mut self,
        label: impl Into<String>,
        producer: impl Fn() -> T + Send + Sync + 'a,
    ) -> Self {
        self.push(label, producer);
        self
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current cursor position. Panics on an empty list.
    pub fn cursor(&self) -> usize {
        assert!(!self.is_empty(), "cursor of an empty SelectableList");
        self.cursor
    }

    /// Move to the next entry, wrapping to the first.
    pub fn advance(&mut self) {
        assert!(!self.is_empty(), "advance on an empty SelectableList");
        self.cursor = (self.cursor + 1) % self.len();
    }

    /// Move to the previous entry, wrapping to the last.
    pub fn retreat(&mut self) {
        assert!(!self.is_empty(), "retreat on an empty SelectableList");
        self.cursor = (self.cursor + self.len() - 1) % self.len();
    }

    pub fn label_at(&self, index: usize) -> &str {
        &self.items[index].0
    }

    pub fn producer_at(&self, index: usize) -> &(dyn Fn() -> T + Send + Sync + 'a) {
        self.items[index].1.as_ref()
    }

    pub fn current_label(&self) -> &str {
        self.label_at(self.cursor())
    }

    pub fn current_producer(&self) -> &(dyn Fn() -> T + Send + Sync + 'a) {
        self.producer_at(self.cursor())
    }

    /// Commit the highlighted choice by running its producer once.
    pub fn invoke(&self) -> T {
        (self.current_producer())()
    }

    /// Labels in display order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(label, _)| label.as_str())
    }

    /// Widget state with the cursor selected (nothing selected when empty).
    pub fn list_state(&self) -> ListState {
        let mut state = ListState::default();
        if !self.is_empty() {
            state.select(Some(self.cursor));
        }
        state
    }
}

impl<T> Default for SelectableList<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn abc() -> SelectableList<'static, char> {
        SelectableList::new()
            .with("A", || 'a')
            .with("B", || 'b')
            .with("C", || 'c')
    }

    #[test]
    fn test_retreat_wraps_to_last() {
        let mut list = abc();
        list.retreat();
        assert_eq!(list.cursor(), 2);
        assert_eq!(list.current_label(), "C");
    }

    #[test]
    fn test_advance_wraps_to_first() {
        let mut list = abc();
        list.retreat();
        list.advance();
        assert_eq!(list.cursor(), 0);
        list.advance();
        assert_eq!(list.cursor(), 1);
        assert_eq!(list.current_label(), "B");
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        // Advancing len times from any start lands on the start again.
        for n in 1usize..6 {
            let mut list = SelectableList::new();
            for i in 0..n {
                list.push(format!("item {i}"), move || i);
            }
            for start in 0..n {
                while list.cursor() != start {
                    list.advance();
                }
                for _ in 0..n {
                    list.advance();
                }
                assert_eq!(list.cursor(), start);
            }
        }
    }

    #[test]
    fn test_producers_run_only_on_invoke() {
        let calls = [
            AtomicUsize::new(0),
            AtomicUsize::new(0),
            AtomicUsize::new(0),
        ];
        let mut list = SelectableList::new();
        for (i, counter) in calls.iter().enumerate() {
            list.push(format!("{i}"), move || {
                counter.fetch_add(1, Ordering::SeqCst);
                i
            });
        }
        assert!(calls.iter().all(|c| c.load(Ordering::SeqCst) == 0));

        list.advance();
        assert_eq!(list.invoke(), 1);
        let counts: Vec<usize> = calls.iter().map(|c| c.load(Ordering::SeqCst)).collect();
        assert_eq!(counts, vec![0, 1, 0]);
    }

    #[test]
    fn test_duplicate_labels_navigate_by_index() {
        let mut list = SelectableList::new().with("same", || 1).with("same", || 2);
        list.advance();
        assert_eq!(list.current_label(), "same");
        assert_eq!(list.invoke(), 2);
        assert_eq!((list.producer_at(0))(), 1);
    }

    #[test]
    fn test_list_state_tracks_cursor() {
        let mut list = abc();
        list.advance();
        assert_eq!(list.list_state().selected(), Some(1));
        let empty: SelectableList<()> = SelectableList::new();
        assert_eq!(empty.list_state().selected(), None);
        assert_eq!(empty.len(), 0);
    }

    #[test]
    #[should_panic(expected = "advance on an empty SelectableList")]
    fn test_advance_on_empty_panics() {
        let mut list: SelectableList<()> = SelectableList::new();
        list.advance();
    }

    #[test]
    #[should_panic(expected = "retreat on an empty SelectableList")]
    fn test_retreat_on_empty_panics() {
        let mut list: SelectableList<()> = SelectableList::new();
        list.retreat();
    }

    #[test]
    #[should_panic]
    fn test_label_out_of_range_panics() {
        let list = abc();
        let _ = list.label_at(3);
    }
}

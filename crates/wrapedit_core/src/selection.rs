//! Selection bounds as reported by the host on activation.

use std::ops::Range;

/// Selection offsets in chars, stored exactly as the host reported them.
///
/// `start` may exceed `end` when the user selected backwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub start: usize,
    pub end: usize,
}

impl SelectionState {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Collapsed selection (a bare caret).
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Selected range with the bounds in ascending order.
    pub fn range(&self) -> Range<usize> {
        self.start.min(self.end)..self.start.max(self.end)
    }

    /// Number of selected chars.
    pub fn len(&self) -> usize {
        self.range().len()
    }

    /// Clamp both bounds to a buffer of `text_len` chars.
    pub fn clamped(self, text_len: usize) -> Self {
        Self::new(self.start.min(text_len), self.end.min(text_len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_host_order_but_ranges_ascending() {
        let selection = SelectionState::new(5, 2);
        assert_eq!((selection.start, selection.end), (5, 2));
        assert_eq!(selection.range(), 2..5);
        assert_eq!(selection.len(), 3);
        assert!(!selection.is_empty());
    }

    #[test]
    fn caret_is_empty_and_clamps() {
        let caret = SelectionState::caret(9);
        assert!(caret.is_empty());
        assert_eq!(caret.clamped(4), SelectionState::caret(4));
    }
}

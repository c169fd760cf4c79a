//! Entry filter: runs on text about to be inserted, before the buffer sees it.

use crate::constants::{CR, LF, MANUAL_BREAK_KEY, PIVOT_MARKER};
use crate::error::EditorError;
use std::borrow::Cow;

/// Substitute the pivot marker for the manual-line-break key.
///
/// Every other character passes through unchanged.
pub fn filter_char(c: char) -> char {
    if c == MANUAL_BREAK_KEY {
        PIVOT_MARKER
    } else {
        c
    }
}

/// Apply the entry filter to a multi-character insertion (paste, `set_text`).
///
/// `\r\n`, lone `\r`, and `\n` each collapse to one pivot marker so pasted
/// line endings of any flavor become manual breaks. Text without break
/// characters is borrowed as-is.
pub fn filter_text(text: &str) -> Cow<'_, str> {
    if !text.contains([CR, LF]) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == CR {
            if chars.peek() == Some(&LF) {
                chars.next();
            }
            out.push(PIVOT_MARKER);
        } else {
            out.push(filter_char(c));
        }
    }
    Cow::Owned(out)
}

/// Report a literal pivot marker in text that did not come through the filter.
///
/// # Returns
/// `Ok(())` when `text` holds no pivot marker.
///
/// # Errors
/// [`EditorError::ReservedCodepoint`] with the char offset of the first marker.
pub fn check_entry(text: &str) -> Result<(), EditorError> {
    match text.chars().position(|c| c == PIVOT_MARKER) {
        Some(offset) => Err(EditorError::ReservedCodepoint { offset }),
        None => Ok(()),
    }
}

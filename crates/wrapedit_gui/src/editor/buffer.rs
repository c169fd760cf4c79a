//! Editor buffer that applies the entry filter and keeps manual breaks atomic.

use eframe::egui;
use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;
use tracing::warn;
use wrapedit_core::constants::{CR, LF};
use wrapedit_core::filter::{check_entry, filter_text};
use wrapedit_core::measure::TextMeasure;
use wrapedit_core::pipeline::{refresh, RefreshOptions, RefreshReport};

fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(idx, _)| idx)
}

/// True when `char_index` sits between the `\r` and `\n` of a manual break.
fn splits_manual_break(text: &str, char_index: usize) -> bool {
    let byte = byte_index(text, char_index);
    text[..byte].ends_with(CR) && text[byte..].starts_with(LF)
}

/// Text storage handed to `egui::TextEdit`.
///
/// With break filtering on, every insertion passes through the entry filter so
/// typed and pasted line breaks arrive as pivot markers. Edits that would land
/// inside a `\r\n` pair are widened to the whole pair; the resulting caret
/// shift is recorded for the widget to apply after `show`.
#[derive(Default)]
pub(crate) struct EditorBuffer {
    text: String,
    revision: u64,
    char_len: usize,
    filter_breaks: bool,
    caret_correction: isize,
}

impl EditorBuffer {
    /// Creates an empty buffer.
    ///
    /// # Arguments
    /// - `filter_breaks`: Route insertions through the entry filter (multi-line mode).
    pub(crate) fn new(filter_breaks: bool) -> Self {
        Self {
            filter_breaks,
            ..Self::default()
        }
    }

    /// Replaces the contents as if the user had entered `text`.
    pub(crate) fn reset(&mut self, text: &str) {
        let admitted = self.admit(text);
        self.text.clear();
        self.text.push_str(&admitted);
        self.char_len = self.text.chars().count();
        self.caret_correction = 0;
        self.revision = self.revision.wrapping_add(1);
    }

    /// Returns the monotonic edit revision counter.
    ///
    /// # Returns
    /// Revision value incremented whenever the content changes.
    pub(crate) fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the buffer size in Unicode scalar values.
    pub(crate) fn chars_len(&self) -> usize {
        self.char_len
    }

    pub(crate) fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Takes and clears the caret shift accumulated by atomic-break edits.
    ///
    /// # Returns
    /// Signed char delta to add to the caret egui computed.
    pub(crate) fn take_caret_correction(&mut self) -> isize {
        std::mem::take(&mut self.caret_correction)
    }

    /// Runs the normalize/wrap pipeline over the buffer contents.
    ///
    /// # Returns
    /// The pipeline report; the revision only moves when bytes changed.
    pub(crate) fn refresh(
        &mut self,
        options: RefreshOptions,
        measure: Option<&mut dyn TextMeasure>,
    ) -> RefreshReport {
        let report = refresh(&mut self.text, options, measure);
        if report.content_changed() {
            self.char_len = self.text.chars().count();
            self.revision = self.revision.wrapping_add(1);
        }
        report
    }

    fn admit<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !self.filter_breaks {
            return Cow::Borrowed(text);
        }
        if let Err(err) = check_entry(text) {
            warn!("{}; admitting it as a manual break", err);
        }
        filter_text(text)
    }
}

impl fmt::Display for EditorBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text.as_str())
    }
}

impl egui::TextBuffer for EditorBuffer {
    fn is_mutable(&self) -> bool {
        true
    }

    fn as_str(&self) -> &str {
        self.text.as_str()
    }

    fn insert_text(&mut self, text: &str, char_index: usize) -> usize {
        if text.is_empty() {
            return 0;
        }
        let mut start_char = char_index.min(self.char_len);
        if splits_manual_break(&self.text, start_char) {
            start_char -= 1;
            self.caret_correction -= 1;
        }
        let admitted = self.admit(text);
        let inserted =
            <String as egui::TextBuffer>::insert_text(&mut self.text, &admitted, start_char);
        if inserted > 0 {
            self.revision = self.revision.wrapping_add(1);
            self.char_len = self.char_len.saturating_add(inserted);
        }
        inserted
    }

    fn delete_char_range(&mut self, char_range: std::ops::Range<usize>) {
        let mut start_char = char_range.start.min(self.char_len);
        let mut end_char = char_range.end.min(self.char_len);
        if start_char >= end_char {
            return;
        }
        if splits_manual_break(&self.text, start_char) {
            start_char -= 1;
            self.caret_correction -= 1;
        }
        if splits_manual_break(&self.text, end_char) {
            end_char += 1;
        }
        <String as egui::TextBuffer>::delete_char_range(&mut self.text, start_char..end_char);
        self.revision = self.revision.wrapping_add(1);
        self.char_len = self.char_len.saturating_sub(end_char - start_char);
    }

    fn clear(&mut self) {
        if self.text.is_empty() {
            return;
        }
        self.text.clear();
        self.revision = self.revision.wrapping_add(1);
        self.char_len = 0;
    }

    // Undo restores raw snapshots, soft breaks included, so nothing is filtered here.
    fn replace_with(&mut self, text: &str) {
        if self.text == text {
            return;
        }
        self.text.clear();
        self.text.push_str(text);
        self.revision = self.revision.wrapping_add(1);
        self.char_len = text.chars().count();
    }

    fn take(&mut self) -> String {
        self.revision = self.revision.wrapping_add(1);
        self.char_len = 0;
        std::mem::take(&mut self.text)
    }

    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}

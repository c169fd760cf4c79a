//! Greedy word-wrap over a normalized buffer.
//!
//! The wrapper only ever rewrites a space into a bare `\n`, so the buffer
//! length never changes and manual breaks (`\r\n`) are left alone. A run with
//! no space since the current line start is allowed to overflow rather than
//! being broken mid-token.

use crate::constants::{LF, WRAP_CANDIDATE};
use crate::measure::{wrap_threshold, TextMeasure};
use tracing::trace;

/// Outcome of one wrap pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WrapReport {
    /// Byte offsets of spaces rewritten into soft breaks, ascending.
    pub inserted_breaks: Vec<usize>,
    /// Number of width queries issued during the pass.
    pub measurements: usize,
}

impl WrapReport {
    pub fn modified(&self) -> bool {
        !self.inserted_breaks.is_empty()
    }
}

/// Scan cursors, rebuilt from scratch every pass.
#[derive(Clone, Copy, Debug, Default)]
struct ScanState {
    line_start: usize,
    last_space: Option<usize>,
}

impl ScanState {
    fn break_after(&mut self, offset: usize) {
        self.line_start = offset + 1;
        self.last_space = None;
    }
}

/// Insert soft breaks so no line exceeds `available_width` where a space allows it.
///
/// A missing measurer or a degenerate width (zero, negative, non-finite)
/// turns the pass into a no-op.
pub fn wrap(
    text: &mut String,
    available_width: f32,
    measure: Option<&mut dyn TextMeasure>,
) -> WrapReport {
    let mut report = WrapReport::default();
    let (Some(limit), Some(measure)) = (wrap_threshold(available_width), measure) else {
        return report;
    };

    let mut state = ScanState::default();
    let mut idx = 0usize;
    while let Some(c) = text[idx..].chars().next() {
        let end = idx + c.len_utf8();
        if c == LF {
            state.break_after(idx);
        } else if c == WRAP_CANDIDATE {
            state.last_space = Some(idx);
        }

        // Without a candidate no break can be inserted, so the width is moot.
        if let Some(space) = state.last_space {
            if state.line_start < end {
                report.measurements += 1;
                let width = measure.text_width(&text[state.line_start..end]);
                if width > limit {
                    text.replace_range(space..space + 1, "\n");
                    report.inserted_breaks.push(space);
                    state.break_after(space);
                    trace!(offset = space, width, limit, "inserted soft break");
                }
            }
        }
        idx = end;
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::MonospaceMeasure;
    use crate::test_support::wrap_cells;

    #[test]
    fn fitting_text_is_untouched() {
        let (text, report) = wrap_cells("abc def", 7.0);
        assert_eq!(text, "abc def");
        assert!(!report.modified());
    }

    #[test]
    fn breaks_at_last_space_before_overflow() {
        let (text, report) = wrap_cells("aaaa bbbb", 5.0);
        assert_eq!(text, "aaaa\nbbbb");
        assert_eq!(report.inserted_breaks, vec![4]);
    }

    #[test]
    fn picks_the_most_recent_space() {
        let (text, _) = wrap_cells("aa bb cc dd", 7.0);
        assert_eq!(text, "aa bb\ncc dd");
    }

    #[test]
    fn unbreakable_run_overflows() {
        let (text, report) = wrap_cells("xxxxxxxxxxxxxxxx", 4.0);
        assert_eq!(text, "xxxxxxxxxxxxxxxx");
        assert!(!report.modified());
        assert_eq!(report.measurements, 0);
    }

    #[test]
    fn long_token_after_a_break_overflows_on_its_own_line() {
        let (text, _) = wrap_cells("ab cdefghij kl", 4.0);
        assert_eq!(text, "ab\ncdefghij\nkl");
    }

    #[test]
    fn manual_breaks_reset_the_line() {
        let (text, _) = wrap_cells("aaa\r\nbbb ccc", 7.0);
        assert_eq!(text, "aaa\r\nbbb ccc");
        let (text, _) = wrap_cells("aaa\r\nbbb ccc", 5.0);
        assert_eq!(text, "aaa\r\nbbb\nccc");
    }

    #[test]
    fn trailing_space_past_limit_becomes_the_break() {
        let (text, _) = wrap_cells("abcd efgh ", 4.0);
        assert_eq!(text, "abcd\nefgh\n");
    }

    #[test]
    fn wide_chars_measure_by_cells() {
        let (text, _) = wrap_cells("日本 語学", 4.0);
        assert_eq!(text, "日本\n語学");
    }

    #[test]
    fn degenerate_widths_and_missing_measurer_are_no_ops() {
        for width in [0.0, -1.0, f32::INFINITY, f32::NAN] {
            let (text, report) = wrap_cells("aaaa bbbb", width);
            assert_eq!(text, "aaaa bbbb", "width: {}", width);
            assert!(!report.modified());
        }
        let mut text = "aaaa bbbb".to_string();
        let report = wrap(&mut text, 2.0, None);
        assert_eq!(text, "aaaa bbbb");
        assert!(!report.modified());
    }

    #[test]
    fn rewrapping_output_is_a_no_op() {
        let mut measure = MonospaceMeasure::cells();
        let mut text = "the quick brown fox jumps over the lazy dog".to_string();
        let first = wrap(&mut text, 10.0, Some(&mut measure));
        assert!(first.modified());
        let snapshot = text.clone();
        let second = wrap(&mut text, 10.0, Some(&mut measure));
        assert!(!second.modified());
        assert_eq!(text, snapshot);
    }
}

//! Line-break normalizer: pivot expansion, then bare line-feed suppression.
//!
//! After [`normalize`] the buffer holds no pivot markers and every `\n` is
//! directly preceded by `\r`. Soft breaks left by an earlier wrap pass are
//! turned back into spaces here and re-derived by the wrapper.

use crate::constants::{CR, LF, MANUAL_BREAK, PIVOT_MARKER, WRAP_CANDIDATE};
use crate::error::EditorError;

/// Outcome of one normalize pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Char offsets (pre-expansion) of every pivot expanded into `\r\n`.
    pub expanded_pivots: Vec<usize>,
    /// Byte offsets of bare line feeds rewritten to spaces, ascending.
    pub suppressed_breaks: Vec<usize>,
}

impl NormalizeReport {
    /// True when the pass rewrote anything and the host must resync.
    pub fn modified(&self) -> bool {
        !self.expanded_pivots.is_empty() || !self.suppressed_breaks.is_empty()
    }

    /// True when pivot expansion changed the buffer length.
    pub fn length_changed(&self) -> bool {
        !self.expanded_pivots.is_empty()
    }
}

/// Normalize `text` in place.
///
/// Pivot expansion runs to completion before suppression so the freshly
/// expanded line feeds are shielded by their carriage returns.
pub fn normalize(text: &mut String) -> NormalizeReport {
    let expanded_pivots = expand_pivots(text);
    let suppressed_breaks = suppress_bare_breaks(text);
    NormalizeReport {
        expanded_pivots,
        suppressed_breaks,
    }
}

/// Replace every pivot marker with a manual break.
///
/// # Returns
/// Char offsets of the replaced markers in the pre-expansion buffer.
pub fn expand_pivots(text: &mut String) -> Vec<usize> {
    if !text.contains(PIVOT_MARKER) {
        return Vec::new();
    }
    let positions: Vec<usize> = text
        .chars()
        .enumerate()
        .filter_map(|(idx, c)| (c == PIVOT_MARKER).then_some(idx))
        .collect();
    *text = text.replace(PIVOT_MARKER, MANUAL_BREAK);
    positions
}

/// Overwrite every `\n` not directly preceded by `\r` with a space.
///
/// Length-preserving: both characters are one byte.
///
/// # Returns
/// Byte offsets of the rewritten line feeds.
pub fn suppress_bare_breaks(text: &mut String) -> Vec<usize> {
    let mut after_cr = false;
    let mut positions = Vec::new();
    for (idx, c) in text.char_indices() {
        if c == LF && !after_cr {
            positions.push(idx);
            // The rewritten space is an ordinary character.
            after_cr = false;
        } else {
            after_cr = c == CR;
        }
    }
    for &pos in &positions {
        text.replace_range(pos..pos + 1, " ");
    }
    positions
}

/// Verify the normalize postcondition on a buffer that holds no soft breaks.
///
/// # Errors
/// [`EditorError::PivotSurvived`] or [`EditorError::BareLineFeed`] with the
/// char offset of the first offending character.
pub fn check_normalized(text: &str) -> Result<(), EditorError> {
    let mut prev = None;
    for (offset, c) in text.chars().enumerate() {
        if c == PIVOT_MARKER {
            return Err(EditorError::PivotSurvived { offset });
        }
        if c == LF && prev != Some(CR) {
            return Err(EditorError::BareLineFeed { offset });
        }
        prev = Some(c);
    }
    Ok(())
}

/// Verify that no pivot marker is left, ignoring soft breaks.
///
/// This is the check that still holds after the wrapper has run.
///
/// # Errors
/// [`EditorError::PivotSurvived`] with the char offset of the first marker.
pub fn check_no_pivots(text: &str) -> Result<(), EditorError> {
    match text.chars().position(|c| c == PIVOT_MARKER) {
        Some(offset) => Err(EditorError::PivotSurvived { offset }),
        None => Ok(()),
    }
}

/// Returns the text the user actually typed.
///
/// Manual breaks and pending pivots become `\n`; soft breaks become the
/// spaces they replaced. A lone `\r` is dropped.
pub fn logical_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            CR => {
                if chars.peek() == Some(&LF) {
                    chars.next();
                    out.push(LF);
                }
            }
            LF => out.push(WRAP_CANDIDATE),
            PIVOT_MARKER => out.push(LF),
            other => out.push(other),
        }
    }
    out
}

/// Counts of each break class in a buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BreakCounts {
    pub manual: usize,
    pub soft: usize,
    pub pending: usize,
}

impl BreakCounts {
    /// Number of visual lines the buffer renders as.
    pub fn visual_lines(&self) -> usize {
        self.manual + self.soft + 1
    }
}

/// Classify every break in `text`.
pub fn classify_breaks(text: &str) -> BreakCounts {
    let mut counts = BreakCounts::default();
    let mut prev = None;
    for c in text.chars() {
        match c {
            LF if prev == Some(CR) => counts.manual += 1,
            LF => counts.soft += 1,
            PIVOT_MARKER => counts.pending += 1,
            _ => {}
        }
        prev = Some(c);
    }
    counts
}

/// Iterate visual lines without their `\r\n` / `\n` terminators.
pub fn visual_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(LF).map(|line| line.strip_suffix(CR).unwrap_or(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pivot_expands_to_manual_break() {
        let mut text = "a\u{07FF}b".to_string();
        let report = normalize(&mut text);
        assert_eq!(text, "a\r\nb");
        assert_eq!(report.expanded_pivots, vec![1]);
        assert!(report.suppressed_breaks.is_empty());
        assert!(report.modified());
        assert!(report.length_changed());
    }

    #[test]
    fn manual_break_is_shielded_by_carriage_return() {
        let mut text = "a\r\nb".to_string();
        let report = normalize(&mut text);
        assert_eq!(text, "a\r\nb");
        assert!(!report.modified());
    }

    #[test]
    fn bare_line_feeds_become_spaces() {
        let mut text = "one\ntwo\r\nthree\n\nfour".to_string();
        let report = normalize(&mut text);
        assert_eq!(text, "one two\r\nthree  four");
        assert_eq!(report.suppressed_breaks, vec![3, 14, 15]);
    }

    #[test]
    fn suppression_tracks_non_ascii_byte_offsets() {
        let mut text = "é\n🦀\nz".to_string();
        let report = normalize(&mut text);
        assert_eq!(text, "é 🦀 z");
        assert_eq!(report.suppressed_breaks, vec![2, 7]);
    }

    #[test]
    fn expansion_offsets_are_chars_not_bytes() {
        let mut text = "日本\u{07FF}語\u{07FF}".to_string();
        let report = normalize(&mut text);
        assert_eq!(text, "日本\r\n語\r\n");
        assert_eq!(report.expanded_pivots, vec![2, 4]);
    }

    #[test]
    fn check_normalized_flags_each_violation() {
        assert_eq!(check_normalized("a\r\nb"), Ok(()));
        assert_eq!(
            check_normalized("ab\nc"),
            Err(EditorError::BareLineFeed { offset: 2 })
        );
        assert_eq!(
            check_normalized("é\u{07FF}"),
            Err(EditorError::PivotSurvived { offset: 1 })
        );
        assert_eq!(check_no_pivots("soft\nbreak"), Ok(()));
    }

    #[test]
    fn logical_text_restores_user_content() {
        assert_eq!(logical_text("aaaa\nbbbb\r\ncc\u{07FF}d"), "aaaa bbbb\ncc\nd");
        assert_eq!(logical_text("lone\rcr"), "lonecr");
    }

    #[test]
    fn classify_breaks_counts_each_class() {
        let counts = classify_breaks("a\r\nb c\nd\u{07FF}e\n");
        assert_eq!(
            counts,
            BreakCounts {
                manual: 1,
                soft: 2,
                pending: 1,
            }
        );
        assert_eq!(counts.visual_lines(), 4);
    }

    #[test]
    fn visual_lines_strip_terminators() {
        let lines: Vec<&str> = visual_lines("ab\r\ncd\nef").collect();
        assert_eq!(lines, vec!["ab", "cd", "ef"]);
    }
}

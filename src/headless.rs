use std::fs;
use std::io::{self, Read};
use std::path::Path;
use wrapedit_core::normalize::{classify_breaks, visual_lines};
use wrapedit_core::{
    filter_text, refresh, BreakCounts, MonospaceMeasure, RefreshOptions, RefreshReport,
};

/// Plain text run through the entry filter and one refresh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrappedText {
    /// Buffer with `\r\n` manual breaks and `\n` soft breaks.
    pub buffer: String,
    pub report: RefreshReport,
    pub counts: BreakCounts,
}

impl WrappedText {
    /// Visual lines without their terminators.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        visual_lines(&self.buffer)
    }

    /// Text to print: the raw buffer, or one visual line per output line.
    pub fn render(&self, raw: bool) -> String {
        if raw {
            return self.buffer.clone();
        }
        let mut out = String::with_capacity(self.buffer.len() + 1);
        for line in self.lines() {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Filter, normalize, and (optionally) wrap `input` at `columns` terminal cells.
///
/// Line endings of any flavor become manual breaks. A column count of zero
/// means no limit.
pub fn wrap_text(input: &str, columns: usize, word_wrap: bool) -> WrappedText {
    let mut buffer = filter_text(input).into_owned();
    let mut measure = MonospaceMeasure::cells();
    let options = RefreshOptions::new(columns as f32, word_wrap);
    let report = refresh(&mut buffer, options, Some(&mut measure));
    let counts = classify_breaks(&buffer);
    WrappedText {
        buffer,
        report,
        counts,
    }
}

/// Read the whole input from `path`, or stdin when no path (or `-`) is given.
///
/// # Errors
/// Returns the underlying I/O error, including invalid UTF-8.
pub fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path),
        _ => {
            let mut input = String::new();
            io::stdin().lock().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_paragraphs_into_visual_lines() {
        let wrapped = wrap_text("aaaa bbbb\ncc dd", 5, true);
        assert_eq!(wrapped.buffer, "aaaa\nbbbb\r\ncc dd");
        assert_eq!(
            wrapped.lines().collect::<Vec<_>>(),
            vec!["aaaa", "bbbb", "cc dd"]
        );
        assert_eq!((wrapped.counts.manual, wrapped.counts.soft), (1, 1));
        assert_eq!(wrapped.render(false), "aaaa\nbbbb\ncc dd\n");
        assert_eq!(wrapped.render(true), "aaaa\nbbbb\r\ncc dd");
    }

    #[test]
    fn zero_columns_or_no_wrap_only_normalize() {
        let unlimited = wrap_text("aaaa bbbb\r\nc", 0, true);
        let unwrapped = wrap_text("aaaa bbbb\r\nc", 4, false);
        for wrapped in [unlimited, unwrapped] {
            assert_eq!(wrapped.buffer, "aaaa bbbb\r\nc");
            assert_eq!(wrapped.counts.soft, 0);
        }
    }
}

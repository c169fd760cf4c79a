//! Shared constants used across wrapedit crates.

/// Reserved codepoint standing in for a manual break until the next normalize pass.
///
/// Two bytes in UTF-8, the same as the CR LF pair it expands into.
pub const PIVOT_MARKER: char = '\u{07FF}';

/// Character the host delivers when the user presses the line-break key.
pub const MANUAL_BREAK_KEY: char = '\n';

/// Byte sequence of a manual (user-entered) break.
pub const MANUAL_BREAK: &str = "\r\n";

/// Carriage return; shields the line feed that follows it.
pub const CR: char = '\r';

/// Line feed; bare occurrences are soft breaks.
pub const LF: char = '\n';

/// The only character the wrapper will turn into a soft break.
pub const WRAP_CANDIDATE: char = ' ';

/// Wire value for "maximum stretch" in editor width/height settings.
pub const STRETCH_SENTINEL: f32 = -1.0;

/// Default editor height in points for multi-line editors.
pub const DEFAULT_EDITOR_HEIGHT: f32 = 240.0;

/// Default wrap column count for the headless CLI.
pub const DEFAULT_WRAP_COLUMNS: usize = 80;

/// Upper bound on cached fragment widths before the cache is flushed.
pub const DEFAULT_MEASURE_CACHE_CAPACITY: usize = 8_192;

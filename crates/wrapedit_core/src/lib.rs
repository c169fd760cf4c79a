//! Core engine for wrapedit: break normalization, greedy word-wrap, and the
//! entry filter that smuggles manual breaks through single-buffer hosts.

/// Editor configuration loaded from environment variables.
pub mod config;
/// Reserved codepoints, break sequences, and sizing defaults.
pub mod constants;
/// Diagnostic error types for invariant checks and config parsing.
pub mod error;
/// Per-character entry filter applied before text reaches the buffer.
pub mod filter;
/// Text measurement seam, monospace measurer, and fragment width cache.
pub mod measure;
/// Pivot expansion and bare line-feed suppression.
pub mod normalize;
/// Normalize-then-wrap pass run on every buffer change.
pub mod pipeline;
/// Selection bounds reported by the host.
pub mod selection;
/// Greedy soft-break insertion.
pub mod wrap;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::EditorConfig;
pub use error::EditorError;
pub use filter::{filter_char, filter_text};
pub use measure::{Extent, MeasureCache, MonospaceMeasure, TextMeasure};
pub use normalize::{logical_text, normalize, BreakCounts, NormalizeReport};
pub use pipeline::{refresh, RefreshOptions, RefreshReport};
pub use selection::SelectionState;
pub use wrap::{wrap, WrapReport};

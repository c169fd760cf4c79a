//! Root crate facade for wrapedit.
//!
//! Re-exports the engine, the headless wrapping helpers used by the CLI, and
//! (behind the `gui` feature) the egui editor widget.

/// Headless filter/normalize/wrap over plain text for terminal output.
pub mod headless;

pub use wrapedit_core::{
    config, constants, error, filter, filter_char, filter_text, logical_text, measure, normalize,
    pipeline, refresh, selection, wrap, BreakCounts, EditorConfig, EditorError, Extent,
    MeasureCache, MonospaceMeasure, NormalizeReport, RefreshOptions, RefreshReport,
    SelectionState, TextMeasure, WrapReport,
};

#[cfg(feature = "gui")]
pub use wrapedit_gui::{run as run_gui, ActivateCallback, EditorMode, EditorWidget, TextEditor};

//! Shared test-only helpers for wrapedit_core.

use crate::measure::MonospaceMeasure;
use crate::wrap::{wrap, WrapReport};

/// Wraps an owned copy of `text` at `width` cells.
///
/// # Returns
/// The wrapped text and the pass report.
pub(crate) fn wrap_cells(text: &str, width: f32) -> (String, WrapReport) {
    let mut owned = text.to_string();
    let mut measure = MonospaceMeasure::cells();
    let report = wrap(&mut owned, width, Some(&mut measure));
    (owned, report)
}

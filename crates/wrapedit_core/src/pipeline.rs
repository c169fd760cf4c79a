//! The per-change refresh: normalize, then wrap.

use crate::measure::{wrap_threshold, TextMeasure};
use crate::normalize::{check_no_pivots, normalize, NormalizeReport};
use crate::wrap::{wrap, WrapReport};
use tracing::{debug, error};

/// Inputs for one refresh that are not the buffer itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefreshOptions {
    /// Width the text area actually has this frame.
    pub available_width: f32,
    /// Run the wrapper after normalizing.
    pub word_wrap: bool,
}

impl RefreshOptions {
    pub fn new(available_width: f32, word_wrap: bool) -> Self {
        Self {
            available_width,
            word_wrap,
        }
    }

    /// Normalize only; existing soft breaks are folded back into spaces.
    pub fn unwrapped() -> Self {
        Self::new(f32::INFINITY, false)
    }
}

/// Combined outcome of a refresh.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub normalize: NormalizeReport,
    pub wrap: WrapReport,
}

impl RefreshReport {
    /// True when any pass wrote to the buffer.
    pub fn modified(&self) -> bool {
        self.normalize.modified() || self.wrap.modified()
    }

    /// True when the buffer content differs from before the refresh.
    ///
    /// The wrapper re-inserting exactly the soft breaks the normalizer just
    /// folded away leaves the bytes as they were.
    pub fn content_changed(&self) -> bool {
        self.normalize.length_changed()
            || self.normalize.suppressed_breaks != self.wrap.inserted_breaks
    }

    /// Map a pre-refresh char offset to its post-refresh position.
    ///
    /// Each expanded pivot before `offset` adds one char.
    pub fn remap_char_offset(&self, offset: usize) -> usize {
        let shift = self
            .normalize
            .expanded_pivots
            .iter()
            .take_while(|&&pivot| pivot < offset)
            .count();
        offset + shift
    }
}

/// Normalize `text`, then greedily wrap it when `options.word_wrap` is set.
///
/// Never fails: a missing measurer or unusable width only skips wrapping.
pub fn refresh(
    text: &mut String,
    options: RefreshOptions,
    measure: Option<&mut dyn TextMeasure>,
) -> RefreshReport {
    let normalized = normalize(text);
    let wrapped = match (options.word_wrap, wrap_threshold(options.available_width)) {
        (true, Some(limit)) => wrap(text, limit, measure),
        _ => WrapReport::default(),
    };

    if let Err(err) = check_no_pivots(text) {
        error!(target: "wrapedit_core::pipeline", "{}", err);
    }

    let report = RefreshReport {
        normalize: normalized,
        wrap: wrapped,
    };
    if report.modified() {
        debug!(
            target: "wrapedit_core::pipeline",
            pivots = report.normalize.expanded_pivots.len(),
            suppressed = report.normalize.suppressed_breaks.len(),
            inserted = report.wrap.inserted_breaks.len(),
            measurements = report.wrap.measurements,
            changed = report.content_changed(),
            "buffer refreshed"
        );
    }
    report
}

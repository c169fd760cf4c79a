//! Text measurement seam used by the wrapper.

use crate::constants::{DEFAULT_MEASURE_CACHE_CAPACITY, STRETCH_SENTINEL};
use crate::error::EditorError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use unicode_width::UnicodeWidthChar;

/// Measures the rendered width of a text fragment.
///
/// Widths are in the same unit as the wrap threshold (points for egui, cells
/// for the CLI). Implementations must not touch the buffer being wrapped.
pub trait TextMeasure {
    fn text_width(&mut self, text: &str) -> f32;
}

impl<F> TextMeasure for F
where
    F: FnMut(&str) -> f32,
{
    fn text_width(&mut self, text: &str) -> f32 {
        self(text)
    }
}

/// Fixed-advance measurer over terminal cell widths.
///
/// Wide (CJK) characters count as two cells; control characters, including
/// `\r` and `\n`, count as zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasure {
    pub advance: f32,
}

impl MonospaceMeasure {
    pub fn new(advance: f32) -> Self {
        Self { advance }
    }

    /// One unit per cell, for column-based wrapping.
    pub fn cells() -> Self {
        Self::new(1.0)
    }
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self::cells()
    }
}

impl TextMeasure for MonospaceMeasure {
    fn text_width(&mut self, text: &str) -> f32 {
        let cells: usize = text
            .chars()
            .filter(|c| !c.is_control())
            .map(|c| c.width().unwrap_or(0))
            .sum();
        cells as f32 * self.advance
    }
}

/// Fragment widths remembered across passes for an expensive measurer.
///
/// Entries are keyed by fragment text under a caller-supplied context key
/// (font size bits, style revision, ...). A context change or exceeding the
/// capacity drops every entry.
#[derive(Debug)]
pub struct MeasureCache {
    context: u64,
    capacity: usize,
    widths: HashMap<Box<str>, f32>,
    hits: u64,
    misses: u64,
}

impl Default for MeasureCache {
    fn default() -> Self {
        Self::new(0)
    }
}

impl MeasureCache {
    pub fn new(context: u64) -> Self {
        Self::with_capacity(context, DEFAULT_MEASURE_CACHE_CAPACITY)
    }

    pub fn with_capacity(context: u64, capacity: usize) -> Self {
        Self {
            context,
            capacity: capacity.max(1),
            widths: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Switch context, dropping every entry if it differs from the current one.
    pub fn set_context(&mut self, context: u64) {
        if self.context != context {
            self.widths.clear();
            self.context = context;
        }
    }

    /// Wrap `inner` so its results are served from and stored in this cache.
    pub fn bind<M: TextMeasure>(&mut self, inner: M) -> CachedMeasure<'_, M> {
        CachedMeasure { cache: self, inner }
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// `(hits, misses)` since construction.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    fn get_or_measure<M: TextMeasure>(&mut self, inner: &mut M, text: &str) -> f32 {
        if let Some(width) = self.widths.get(text) {
            self.hits += 1;
            return *width;
        }
        self.misses += 1;
        let width = inner.text_width(text);
        if self.widths.len() >= self.capacity {
            self.widths.clear();
        }
        self.widths.insert(text.into(), width);
        width
    }
}

/// A measurer routed through a [`MeasureCache`].
pub struct CachedMeasure<'c, M> {
    cache: &'c mut MeasureCache,
    inner: M,
}

impl<M: TextMeasure> TextMeasure for CachedMeasure<'_, M> {
    fn text_width(&mut self, text: &str) -> f32 {
        self.cache.get_or_measure(&mut self.inner, text)
    }
}

/// Editor width or height as configured by the host.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Extent {
    /// Fill the available space.
    Stretch,
    /// Fixed size in points.
    Points(f32),
}

impl Extent {
    /// Decode the wire form where `-1` means "maximum stretch".
    pub fn from_points(value: f32) -> Self {
        if value == STRETCH_SENTINEL || !value.is_finite() || value < 0.0 {
            Self::Stretch
        } else {
            Self::Points(value)
        }
    }

    /// Wire form of this extent.
    pub fn to_points(self) -> f32 {
        match self {
            Self::Stretch => STRETCH_SENTINEL,
            Self::Points(value) => value,
        }
    }

    /// Resolve against the space the host has on offer.
    pub fn resolve(self, available: f32) -> f32 {
        match self {
            Self::Stretch => available,
            Self::Points(value) => value.min(available),
        }
    }

    /// Parse a settings value: `-1`/`stretch` or a non-negative number.
    ///
    /// # Errors
    /// [`EditorError::InvalidExtent`] for anything else.
    pub fn parse(value: &str) -> Result<Self, EditorError> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("stretch") {
            return Ok(Self::Stretch);
        }
        match trimmed.parse::<f32>() {
            Ok(points) if points == STRETCH_SENTINEL => Ok(Self::Stretch),
            Ok(points) if points.is_finite() && points >= 0.0 => Ok(Self::Points(points)),
            _ => Err(EditorError::InvalidExtent {
                value: value.to_string(),
            }),
        }
    }
}

/// Map an available width to a wrap threshold.
///
/// Zero, negative, and non-finite widths mean "no limit".
pub fn wrap_threshold(available_width: f32) -> Option<f32> {
    (available_width.is_finite() && available_width > 0.0).then_some(available_width)
}

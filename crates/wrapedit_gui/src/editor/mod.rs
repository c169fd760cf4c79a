//! Text editor widget: a single-line field or a multi-line body whose buffer is
//! kept normalized and greedily word-wrapped by `wrapedit_core`.

mod buffer;
mod measure;

use buffer::EditorBuffer;
use eframe::egui::{
    self,
    text::{CCursor, CCursorRange, LayoutJob},
    text_edit::TextEditOutput,
};
use measure::{display_text, measure_context, EguiMeasure};
use std::fmt;
use tracing::debug;
use wrapedit_core::config::EditorConfig;
use wrapedit_core::measure::{Extent, MeasureCache};
use wrapedit_core::normalize::{classify_breaks, BreakCounts};
use wrapedit_core::pipeline::{RefreshOptions, RefreshReport};
use wrapedit_core::{logical_text, SelectionState};

/// Callback invoked with the editor on every activation event.
///
/// The callback is detached from the editor while it runs: inside it,
/// [`TextEditor::has_on_activate`] reports `false`. It is reattached before
/// `show` returns.
pub type ActivateCallback = Box<dyn FnMut(&TextEditor)>;

/// Which widget the editor renders as.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditorMode {
    /// Plain field: tracks selection and fires the activation callback.
    SingleLine,
    /// Wrapped body: entry filter, normalizer, and wrapper all run.
    MultiLine,
}

/// Buffer state the last refresh was computed for.
#[derive(Copy, Clone, Debug, PartialEq)]
struct WrapSync {
    revision: u64,
    wrap_width: f32,
}

/// Outer editor object owned by the host application.
pub struct TextEditor {
    mode: EditorMode,
    buffer: EditorBuffer,
    width: Extent,
    height: Extent,
    word_wrap: bool,
    auto_select: bool,
    selection: SelectionState,
    on_activate: Option<ActivateCallback>,
    text_style: egui::TextStyle,
    hint_text: String,
    focus_next: bool,
    synced: Option<WrapSync>,
    measure_cache: MeasureCache,
}

impl fmt::Debug for TextEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextEditor")
            .field("mode", &self.mode)
            .field("text", &self.buffer.text())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("word_wrap", &self.word_wrap)
            .field("auto_select", &self.auto_select)
            .field("selection", &self.selection)
            .field("has_on_activate", &self.on_activate.is_some())
            .finish()
    }
}

impl TextEditor {
    /// Creates a single-line editor.
    ///
    /// # Arguments
    /// - `width`/`height`: Size in points; `-1` (or [`Extent::Stretch`]) fills
    ///   the available space.
    /// - `on_activate`: Called with the editor on every activation event.
    pub fn new(width: f32, height: f32, on_activate: Option<ActivateCallback>) -> Self {
        Self::with_mode(
            EditorMode::SingleLine,
            Extent::from_points(width),
            Extent::from_points(height),
            on_activate,
        )
    }

    /// Creates a multi-line editor with word wrap on.
    pub fn new_multiline(width: f32, height: f32) -> Self {
        Self::with_mode(
            EditorMode::MultiLine,
            Extent::from_points(width),
            Extent::from_points(height),
            None,
        )
    }

    /// Creates a multi-line editor sized and flagged from `config`.
    pub fn from_config(config: &EditorConfig) -> Self {
        let mut editor = Self::with_mode(EditorMode::MultiLine, config.width, config.height, None);
        editor.word_wrap = config.word_wrap;
        editor.auto_select = config.auto_select;
        editor
    }

    fn with_mode(
        mode: EditorMode,
        width: Extent,
        height: Extent,
        on_activate: Option<ActivateCallback>,
    ) -> Self {
        Self {
            mode,
            buffer: EditorBuffer::new(mode == EditorMode::MultiLine),
            width,
            height,
            word_wrap: true,
            auto_select: true,
            selection: SelectionState::default(),
            on_activate,
            text_style: match mode {
                EditorMode::SingleLine => egui::TextStyle::Body,
                EditorMode::MultiLine => egui::TextStyle::Monospace,
            },
            hint_text: String::new(),
            focus_next: false,
            synced: None,
            measure_cache: MeasureCache::default(),
        }
    }

    /// Sets the text style used to lay out and measure the buffer.
    pub fn with_text_style(mut self, text_style: egui::TextStyle) -> Self {
        self.text_style = text_style;
        self.synced = None;
        self
    }

    pub fn with_hint_text(mut self, hint_text: impl Into<String>) -> Self {
        self.hint_text = hint_text.into();
        self
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Raw buffer contents, including manual (`\r\n`) and soft (`\n`) breaks.
    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    /// Buffer contents with soft breaks folded back into spaces.
    pub fn logical_text(&self) -> String {
        logical_text(self.buffer.text())
    }

    /// Replaces the contents. In multi-line mode line breaks of any flavor
    /// become manual breaks on the next frame.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.reset(text);
        self.selection = self.selection.clamped(self.buffer.chars_len());
    }

    pub fn size(&self) -> (Extent, Extent) {
        (self.width, self.height)
    }

    /// Sets the size in points; `-1` stretches to the available space.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = Extent::from_points(width);
        self.height = Extent::from_points(height);
    }

    pub fn word_wrap(&self) -> bool {
        self.word_wrap
    }

    /// Toggles greedy wrapping; takes effect on the next frame.
    pub fn set_word_wrap(&mut self, word_wrap: bool) {
        if self.word_wrap != word_wrap {
            self.word_wrap = word_wrap;
            self.synced = None;
        }
    }

    pub fn auto_select(&self) -> bool {
        self.auto_select
    }

    pub fn set_auto_select(&mut self, auto_select: bool) {
        self.auto_select = auto_select;
    }

    /// Last selection reported by the host, in chars.
    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn set_on_activate(&mut self, callback: impl FnMut(&TextEditor) + 'static) {
        self.on_activate = Some(Box::new(callback));
    }

    pub fn clear_on_activate(&mut self) {
        self.on_activate = None;
    }

    /// Whether a callback is registered. `false` while the callback itself runs.
    pub fn has_on_activate(&self) -> bool {
        self.on_activate.is_some()
    }

    /// Gives the editor keyboard focus on the next frame it is shown.
    pub fn request_focus(&mut self) {
        self.focus_next = true;
    }

    /// Manual, soft, and pending break counts of the current buffer.
    pub fn break_counts(&self) -> BreakCounts {
        classify_breaks(self.buffer.text())
    }

    /// Widget for the current mode, for use with `ui.add`.
    pub fn widget(&mut self) -> EditorWidget<'_> {
        EditorWidget { editor: self }
    }

    /// Renders the editor; call once per frame.
    pub fn build(&mut self, ui: &mut egui::Ui) -> egui::Response {
        ui.add(self.widget())
    }

    /// Renders the editor and returns the full `TextEdit` output.
    pub fn show(&mut self, ui: &mut egui::Ui) -> TextEditOutput {
        let output = match self.mode {
            EditorMode::SingleLine => self.show_single_line(ui),
            EditorMode::MultiLine => self.show_multi_line(ui),
        };
        if self.focus_next {
            output.response.request_focus();
            self.focus_next = false;
        }
        if self.auto_select && output.response.gained_focus() {
            let len = self.buffer.chars_len();
            store_char_range(&output, 0, len);
            self.selection = SelectionState::new(0, len);
        }
        if self.mode == EditorMode::SingleLine && output.response.has_focus() {
            if let Some(range) = output.cursor_range {
                self.selection = SelectionState::new(range.secondary.index, range.primary.index);
            }
            self.activate();
        }
        output
    }

    fn resolve_size(&self, ui: &egui::Ui) -> egui::Vec2 {
        let finite = |value: f32| if value.is_finite() { value } else { 0.0 };
        egui::vec2(
            finite(self.width.resolve(ui.available_width())),
            finite(self.height.resolve(ui.available_height())),
        )
    }

    fn activate(&mut self) {
        let Some(mut callback) = self.on_activate.take() else {
            return;
        };
        callback(&*self);
        self.on_activate = Some(callback);
    }

    fn show_single_line(&mut self, ui: &mut egui::Ui) -> TextEditOutput {
        let size = self.resolve_size(ui);
        egui::TextEdit::singleline(&mut self.buffer)
            .font(self.text_style.clone())
            .desired_width(size.x)
            .hint_text(self.hint_text.as_str())
            .show(ui)
    }

    fn show_multi_line(&mut self, ui: &mut egui::Ui) -> TextEditOutput {
        let size = self.resolve_size(ui);
        let font = self.text_style.resolve(ui.style());
        let mut seen_wrap_width = None;
        let mut output = {
            let mut layouter = |ui: &egui::Ui, text: &dyn egui::TextBuffer, wrap_width: f32| {
                seen_wrap_width = Some(wrap_width);
                // Wrapping lives in the buffer; egui only lays out what is there.
                let job = LayoutJob::simple(
                    display_text(text.as_str()).into_owned(),
                    font.clone(),
                    ui.visuals().text_color(),
                    f32::INFINITY,
                );
                ui.fonts_mut(|f| f.layout_job(job))
            };
            egui::TextEdit::multiline(&mut self.buffer)
                .font(font.clone())
                .desired_width(size.x)
                .min_size(size)
                .lock_focus(true)
                .hint_text(self.hint_text.as_str())
                .layouter(&mut layouter)
                .show(ui)
        };

        let correction = self.buffer.take_caret_correction();
        let report = seen_wrap_width.and_then(|wrap_width| self.sync_wrap(ui, &font, wrap_width));
        if let Some(report) = &report {
            if report.content_changed() {
                output.response.mark_changed();
                ui.ctx().request_repaint();
            }
        }
        let shifted = report
            .as_ref()
            .is_some_and(|report| report.normalize.length_changed());
        if correction != 0 || shifted {
            if let Some(range) = output.cursor_range {
                let fix = |index: usize| {
                    let corrected = index.saturating_add_signed(correction);
                    report
                        .as_ref()
                        .map_or(corrected, |report| report.remap_char_offset(corrected))
                };
                store_char_range(&output, fix(range.secondary.index), fix(range.primary.index));
            }
        }
        output
    }

    /// Re-runs the pipeline when the buffer or the wrap width moved.
    fn sync_wrap(
        &mut self,
        ui: &egui::Ui,
        font: &egui::FontId,
        wrap_width: f32,
    ) -> Option<RefreshReport> {
        let current = WrapSync {
            revision: self.buffer.revision(),
            wrap_width,
        };
        if self.synced == Some(current) {
            return None;
        }
        self.measure_cache
            .set_context(measure_context(font, ui.ctx().pixels_per_point()));
        let options = RefreshOptions::new(wrap_width, self.word_wrap);
        let report = {
            let mut measure = self.measure_cache.bind(EguiMeasure::new(ui, font.clone()));
            self.buffer.refresh(options, Some(&mut measure))
        };
        let (hits, misses) = self.measure_cache.stats();
        debug!(
            revision = current.revision,
            wrap_width,
            changed = report.content_changed(),
            cache_hits = hits,
            cache_misses = misses,
            "editor refreshed"
        );
        self.synced = Some(WrapSync {
            revision: self.buffer.revision(),
            wrap_width,
        });
        self.selection = self.selection.clamped(self.buffer.chars_len());
        Some(report)
    }
}

fn store_char_range(output: &TextEditOutput, secondary: usize, primary: usize) {
    let mut state = output.state.clone();
    state.cursor.set_char_range(Some(CCursorRange::two(
        CCursor::new(secondary),
        CCursor::new(primary),
    )));
    state.store(&output.response.ctx, output.response.id);
    output.response.ctx.request_repaint();
}

/// [`egui::Widget`] view of a [`TextEditor`] for the current mode.
pub struct EditorWidget<'a> {
    editor: &'a mut TextEditor,
}

impl egui::Widget for EditorWidget<'_> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        self.editor.show(ui).response
    }
}

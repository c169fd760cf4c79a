//! egui-backed text measurement and the display form of the buffer.

use eframe::egui::{self, Color32, FontId};
use std::borrow::Cow;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use wrapedit_core::constants::CR;
use wrapedit_core::measure::TextMeasure;

/// Text as painted: the `\r` of a manual break shows as a blank cell.
///
/// Char count is preserved so galley cursors line up with buffer offsets.
pub(crate) fn display_text(text: &str) -> Cow<'_, str> {
    if text.contains(CR) {
        Cow::Owned(text.replace(CR, " "))
    } else {
        Cow::Borrowed(text)
    }
}

/// Cache key for measured widths: font plus pixel density.
pub(crate) fn measure_context(font: &FontId, pixels_per_point: f32) -> u64 {
    let mut hasher = DefaultHasher::new();
    font.hash(&mut hasher);
    pixels_per_point.to_bits().hash(&mut hasher);
    hasher.finish()
}

/// Measures fragments with the editor font through egui's font system.
pub(crate) struct EguiMeasure<'u> {
    ui: &'u egui::Ui,
    font: FontId,
    color: Color32,
}

impl<'u> EguiMeasure<'u> {
    pub(crate) fn new(ui: &'u egui::Ui, font: FontId) -> Self {
        Self {
            color: ui.visuals().text_color(),
            ui,
            font,
        }
    }
}

impl TextMeasure for EguiMeasure<'_> {
    fn text_width(&mut self, text: &str) -> f32 {
        let shown = display_text(text).into_owned();
        self.ui.fonts_mut(|f| {
            f.layout_no_wrap(shown, self.font.clone(), self.color)
                .size()
                .x
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_text_blanks_carriage_returns() {
        assert_eq!(display_text("a\r\nb"), "a \nb");
        assert!(matches!(display_text("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn measure_context_separates_fonts_and_densities() {
        let mono = FontId::monospace(14.0);
        assert_eq!(measure_context(&mono, 1.0), measure_context(&mono, 1.0));
        assert_ne!(measure_context(&mono, 1.0), measure_context(&mono, 2.0));
        assert_ne!(
            measure_context(&mono, 1.0),
            measure_context(&FontId::proportional(14.0), 1.0)
        );
    }

    #[test]
    fn egui_measure_grows_with_text() {
        let ctx = egui::Context::default();
        let mut widths = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let mut measure = EguiMeasure::new(ui, FontId::monospace(14.0));
                widths = Some((
                    measure.text_width("a"),
                    measure.text_width("a b c"),
                    measure.text_width("a\r"),
                ));
            });
        });
        let (one, five, with_cr) = widths.expect("measured inside a pass");
        assert!(one > 0.0);
        assert!(five > one);
        assert!(with_cr > one);
    }
}

//! Demo egui app: a single-line title field above a wrapped body editor.

use crate::editor::TextEditor;
use eframe::egui::{self, RichText};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info};
use wrapedit_core::{EditorConfig, SelectionState};

pub(crate) const DEFAULT_WINDOW_SIZE: [f32; 2] = [760.0, 540.0];
pub(crate) const MIN_WINDOW_SIZE: [f32; 2] = [360.0, 260.0];
const TITLE_WIDTH: f32 = -1.0;
const TITLE_HEIGHT: f32 = -1.0;
const COLOR_TEXT_MUTED: egui::Color32 = egui::Color32::from_rgb(0x6e, 0x76, 0x81);

/// Storage key for the persisted [`EditorConfig`].
const SETTINGS_KEY: &str = "wrapedit_settings";

const SAMPLE_BODY: &str = "Type here. Long lines wrap at the last space that fits, \
and the wrap follows the window as it is resized.\n\
Press Enter for a manual break; it stays put while soft breaks come and go.";

/// Demo application shell.
pub(crate) struct WrapEditApp {
    title: TextEditor,
    body: TextEditor,
    last_activation: Rc<Cell<Option<SelectionState>>>,
    activations: Rc<Cell<u64>>,
    columns: usize,
}

/// Picks the settings saved by a previous session, or `fallback` when no
/// readable copy exists.
pub(crate) fn restore_config(
    storage: Option<&dyn eframe::Storage>,
    fallback: EditorConfig,
) -> EditorConfig {
    match storage.and_then(|storage| eframe::get_value::<EditorConfig>(storage, SETTINGS_KEY)) {
        Some(saved) => {
            debug!(?saved, "restored saved editor settings");
            saved
        }
        None => fallback,
    }
}

impl WrapEditApp {
    /// Builds the demo from environment configuration.
    pub(crate) fn new(config: &EditorConfig) -> Self {
        let last_activation = Rc::new(Cell::new(None));
        let activations = Rc::new(Cell::new(0u64));

        let mut title = TextEditor::new(TITLE_WIDTH, TITLE_HEIGHT, None)
            .with_hint_text("Title (focus and select to fire the activation callback)");
        title.set_auto_select(config.auto_select);
        let seen = Rc::clone(&last_activation);
        let count = Rc::clone(&activations);
        title.set_on_activate(move |editor: &TextEditor| {
            seen.set(Some(editor.selection()));
            count.set(count.get().wrapping_add(1));
        });

        let mut body = TextEditor::from_config(config).with_hint_text("Start typing...");
        body.set_text(SAMPLE_BODY);
        body.request_focus();

        info!(
            word_wrap = config.word_wrap,
            auto_select = config.auto_select,
            "wrapedit demo ready"
        );
        Self {
            title,
            body,
            last_activation,
            activations,
            columns: config.columns,
        }
    }

    /// Current toggles and sizes, in the shape they are persisted.
    pub(crate) fn settings(&self) -> EditorConfig {
        let (width, height) = self.body.size();
        EditorConfig {
            word_wrap: self.body.word_wrap(),
            auto_select: self.body.auto_select(),
            width,
            height,
            columns: self.columns,
        }
    }

    /// Renders every panel for one frame.
    pub(crate) fn ui(&mut self, ctx: &egui::Context) {
        self.render_toolbar(ctx);
        self.render_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.body.build(ui);
                });
        });
    }

    fn render_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.title.build(ui);
            ui.horizontal(|ui| {
                let mut word_wrap = self.body.word_wrap();
                if ui.checkbox(&mut word_wrap, "Word wrap").changed() {
                    self.body.set_word_wrap(word_wrap);
                    info!(word_wrap, "toggled word wrap");
                }
                let mut auto_select = self.body.auto_select();
                if ui.checkbox(&mut auto_select, "Select all on focus").changed() {
                    self.body.set_auto_select(auto_select);
                    self.title.set_auto_select(auto_select);
                }
                if ui.button("Clear").clicked() {
                    self.body.set_text("");
                    self.body.request_focus();
                }
            });
            ui.add_space(2.0);
        });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let counts = self.body.break_counts();
                    ui.label(
                        RichText::new(format!(
                            "{} lines · {} manual · {} soft",
                            counts.visual_lines(),
                            counts.manual,
                            counts.soft
                        ))
                        .small(),
                    );
                    ui.separator();
                    let activation = match self.last_activation.get() {
                        Some(selection) if selection.is_empty() => {
                            format!("title caret {}", selection.start)
                        }
                        Some(selection) => {
                            format!("title selection {}..{}", selection.start, selection.end)
                        }
                        None => "title idle".to_string(),
                    };
                    ui.label(RichText::new(activation).small().color(COLOR_TEXT_MUTED));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!("{} activations", self.activations.get()))
                                .small()
                                .color(COLOR_TEXT_MUTED),
                        );
                    });
                });
            });
    }
}

impl eframe::App for WrapEditApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, SETTINGS_KEY, &self.settings());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::App as _;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStorage {
        values: HashMap<String, String>,
    }

    impl eframe::Storage for MemoryStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.values.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.values.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    fn run_app_once(app: &mut WrapEditApp, ctx: &egui::Context) {
        let _ = ctx.run(egui::RawInput::default(), |ctx| app.ui(ctx));
    }

    #[test]
    fn sample_body_gets_a_manual_break_on_first_frame() {
        let ctx = egui::Context::default();
        let mut app = WrapEditApp::new(&EditorConfig::default());
        run_app_once(&mut app, &ctx);
        let counts = app.body.break_counts();
        assert_eq!(counts.manual, 1);
        assert_eq!(counts.pending, 0);
        assert!(app.body.logical_text().contains("resized.\nPress Enter"));
    }

    #[test]
    fn title_is_idle_until_focused() {
        let ctx = egui::Context::default();
        let mut app = WrapEditApp::new(&EditorConfig::default());
        run_app_once(&mut app, &ctx);
        run_app_once(&mut app, &ctx);
        assert_eq!(app.activations.get(), 0);
        assert_eq!(app.last_activation.get(), None);
    }

    #[test]
    fn disabled_word_wrap_from_config_keeps_lines_long() {
        let ctx = egui::Context::default();
        let config = EditorConfig {
            word_wrap: false,
            ..EditorConfig::default()
        };
        let mut app = WrapEditApp::new(&config);
        run_app_once(&mut app, &ctx);
        assert_eq!(app.body.break_counts().soft, 0);
    }

    #[test]
    fn saved_toggles_are_restored_on_next_launch() {
        let config = EditorConfig {
            columns: 72,
            ..EditorConfig::default()
        };
        let mut app = WrapEditApp::new(&config);
        app.body.set_word_wrap(false);
        app.body.set_auto_select(false);

        let mut storage = MemoryStorage::default();
        app.save(&mut storage);

        let storage: &dyn eframe::Storage = &storage;
        let restored = restore_config(Some(storage), EditorConfig::default());
        assert!(!restored.word_wrap);
        assert!(!restored.auto_select);
        assert_eq!(restored.columns, 72);
        assert_eq!(restored.height, config.height);
    }

    #[test]
    fn missing_or_unreadable_settings_use_fallback() {
        let fallback = EditorConfig {
            word_wrap: false,
            ..EditorConfig::default()
        };
        assert_eq!(restore_config(None, fallback.clone()), fallback);

        let mut storage = MemoryStorage::default();
        eframe::Storage::set_string(&mut storage, SETTINGS_KEY, "not ron".to_string());
        let storage: &dyn eframe::Storage = &storage;
        assert_eq!(restore_config(Some(storage), fallback.clone()), fallback);
    }
}

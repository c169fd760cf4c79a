//! egui host for the wrapedit engine.
//!
//! Exposes the [`TextEditor`] widget and a `run` helper so the workspace root
//! can launch the demo without duplicating initialization logic.

mod app;
/// Text editor widget and its buffer glue.
pub mod editor;

pub use editor::{ActivateCallback, EditorMode, EditorWidget, TextEditor};

use app::WrapEditApp;
use eframe::egui;
use tracing_subscriber::EnvFilter;
use wrapedit_core::EditorConfig;

const DEFAULT_LOG_FILTER: &str = "wrapedit=warn,wrapedit_gui=info,wrapedit_core=warn";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A host that already installed a subscriber keeps it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init();
}

/// Start the demo UI with tracing enabled.
///
/// # Returns
/// The result of `eframe::run_native`.
///
/// # Errors
/// Propagates any `eframe` initialization or runtime error.
pub fn run() -> eframe::Result<()> {
    init_tracing();

    let config = EditorConfig::from_env();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(app::DEFAULT_WINDOW_SIZE)
            .with_min_inner_size(app::MIN_WINDOW_SIZE)
            .with_title("wrapedit"),
        ..Default::default()
    };

    eframe::run_native(
        "wrapedit",
        options,
        Box::new(move |cc| {
            let config = app::restore_config(cc.storage, config);
            Ok(Box::new(WrapEditApp::new(&config)))
        }),
    )
}

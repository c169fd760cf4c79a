#![cfg(feature = "gui")]
//! Desktop demo entrypoint.

fn main() {
    if let Err(err) = wrapedit::run_gui() {
        eprintln!("wrapedit gui failed: {}", err);
        std::process::exit(1);
    }
}

// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use eframe::egui::{IconData, ViewportBuilder};
use nc_tracker::{card, gui};

fn app_icon() -> IconData {
    let (rgba, width, height) = card::app_icon();
    IconData { rgba, width, height }
}

fn main() {
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("Nowcoder Tracker")
            .with_inner_size([1200.0, 780.0])
            .with_icon(app_icon()),
        ..Default::default()
    };

    if let Err(e) = gui::run(options) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}

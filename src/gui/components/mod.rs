// src/gui/components/mod.rs
use eframe::egui::Color32;

use crate::card::canvas::hex;

pub mod pager;
pub mod problem_grid;
pub mod search_bar;
pub mod tabs;

/// `#rrggbb` → egui colour (same parser the card renderer uses).
pub fn color32(s: &str) -> Color32 {
    let [r, g, b] = hex(s);
    Color32::from_rgb(r, g, b)
}

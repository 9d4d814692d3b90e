// src/gui/components/search_bar.rs
use std::time::Instant;

use eframe::egui;

use crate::gui::app::App;

/// Uid / rival boxes and the search button shared by the problems pages.
pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        let gui = &mut app.tracker.state.gui;
        ui.label("UID");
        ui.add(egui::TextEdit::singleline(&mut gui.search_uid).desired_width(110.0));
        ui.label("对手");
        ui.add(egui::TextEdit::singleline(&mut gui.rival_uid).desired_width(110.0));
        if ui.button("查询").clicked() {
            app.save_prefs();
            app.tracker.request_search(Instant::now());
        }
    });

    if let Some(found) = &app.state().last_searched_user_data {
        ui.horizontal(|ui| {
            let u = &found.user1;
            ui.label(format!("{}: {} 题, 排名 {}", u.name, u.count, u.rank_label()));
            if let Some(r) = &found.user2 {
                ui.separator();
                ui.label(format!("{}: {} 题, 排名 {}", r.name, r.count, r.rank_label()));
            }
        });
    }
}

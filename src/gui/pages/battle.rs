// src/gui/pages/battle.rs
use eframe::egui;

use super::Page;
use crate::gui::app::App;
use crate::gui::components::tabs;
use crate::router::Tab;

pub struct BattlePage;
pub static PAGE: BattlePage = BattlePage;

const MODES: [(&str, &str); 2] = [("1v1", "1v1"), ("ai", "人机")];
/// Matchmaking score used until the server reports a level score.
const DEFAULT_RANK_SCORE: u64 = 1000;

impl Page for BattlePage {
    fn tab(&self) -> Tab { Tab::Battle }
    fn title(&self) -> &'static str { "对战" }

    fn draw(&self, ui: &mut egui::Ui, app: &mut App) {
        let mode = app.views.battle_mode.clone();
        if let Some(key) = tabs::sub_tabs(ui, &mode, &MODES) {
            app.views.battle_mode = s!(key);
        }
        let score = DEFAULT_RANK_SCORE;

        ui.horizontal(|ui| {
            if ui.button("匹配").clicked() {
                let r = app.api().battle_match(score, &mode);
                app.views.battle = app.report("匹配", r);
            }
            if ui.button("刷新").clicked() {
                let r = app.api().battle_poll();
                if let Some(m) = app.fetched("对战状态", r) {
                    app.views.battle = Some(m);
                }
            }
            if ui.button("取消").clicked() {
                let r = app.api().battle_cancel(&mode);
                if app.report("取消匹配", r).is_some() {
                    app.views.battle = None;
                }
            }
        });
        ui.separator();

        match &app.views.battle {
            Some(m) if m.matched => {
                let room = m.room_id.clone().unwrap_or_default();
                ui.label(format!("匹配成功，房间 {room}"));
                if let Some(opp) = &m.opponent_id {
                    ui.label(format!("对手 {opp}"));
                }
            }
            Some(_) => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("匹配中…");
                });
            }
            None => { ui.label("未在队列中"); }
        }
    }
}

// src/gui/pages/rankings.rs
use eframe::egui;
use egui_extras::{Column, TableBuilder};

use super::Page;
use crate::api::{RankEntry, RankType};
use crate::config::consts::RANKINGS_PAGE_SIZE;
use crate::config::state::LoadModule;
use crate::events::Event;
use crate::gui::app::App;
use crate::gui::components::{pager, tabs};
use crate::router::Tab;

pub struct RankingsPage;
pub static PAGE: RankingsPage = RankingsPage;

const BOARDS: [(&str, &str); 2] = [("problem", "做题榜"), ("checkin", "打卡榜")];

/// Look one user up on the active board (driven by `UserSearch`).
pub fn search(app: &mut App, uid: &str) {
    let uid = s!(uid.trim());
    if uid.is_empty() {
        return;
    }
    let board = app.state().active_rankings_tab;
    let found = app
        .load(LoadModule::Rankings, |api| api.fetch_rankings(board, 1, Some(&uid), RANKINGS_PAGE_SIZE))
        .and_then(|page| page.find(&uid).cloned().or_else(|| page.ranks.into_iter().next()));
    if found.is_none() {
        app.status("用户未找到");
    }
    app.views.rank_search = found;
}

impl Page for RankingsPage {
    fn tab(&self) -> Tab { Tab::Rankings }
    fn title(&self) -> &'static str { "排行榜" }

    fn on_enter(&self, app: &mut App) {
        let board = app.state().active_rankings_tab;
        let page = app.state().rankings_current_page;
        match app.load(LoadModule::Rankings, |api| api.fetch_rankings_page(board, page)) {
            Some(p) => {
                app.state_mut().rankings_total_users = p.total_count;
                app.views.rank_page = Some(p);
            }
            None => {
                app.views.rank_page = None;
                app.status("加载排行榜失败");
            }
        }
    }

    fn draw(&self, ui: &mut egui::Ui, app: &mut App) {
        let board = app.state().active_rankings_tab;
        if let Some(key) = tabs::sub_tabs(ui, board.name(), &BOARDS) {
            let next = RankType::from_name(key).unwrap_or_default();
            app.state_mut().set_active_rankings_tab(next);
            app.views.rank_search = None;
            self.on_enter(app);
        }

        ui.horizontal(|ui| {
            ui.label("UID");
            ui.add(egui::TextEdit::singleline(&mut app.tracker.state.gui.search_uid).desired_width(120.0));
            if ui.button("查找").clicked() {
                app.save_prefs();
                let uid = app.state().gui.search_uid.trim().to_string();
                app.tracker.bus.emit(&Event::UserSearch { uid });
            }
        });
        if let Some(me) = &app.views.rank_search {
            ui.label(format!("{} (uid {}): {}, 排名 {}", me.name, me.uid, me.count, me.rank_label()));
        }
        ui.separator();

        if app.state().is_loading(LoadModule::Rankings) {
            ui.spinner();
        }
        if let Some(page) = &app.views.rank_page {
            rank_table(ui, &page.ranks, board);
        }

        let mut page = app.state().rankings_current_page;
        if pager::draw(ui, &mut page, app.state().rankings_total_users, RANKINGS_PAGE_SIZE) {
            app.state_mut().rankings_current_page = page;
            self.on_enter(app);
        }
    }
}

fn rank_table(ui: &mut egui::Ui, ranks: &[RankEntry], board: RankType) {
    let value_header = match board {
        RankType::Problem => "做题数",
        RankType::Checkin => "打卡天数",
    };
    TableBuilder::new(ui)
        .id_salt(("rankings", board.name()))
        .striped(true)
        .vscroll(false)
        .column(Column::exact(60.0))
        .column(Column::remainder().clip(true))
        .column(Column::exact(90.0))
        .column(Column::exact(90.0))
        .header(20.0, |mut h| {
            h.col(|ui| { ui.strong("排名"); });
            h.col(|ui| { ui.strong("用户"); });
            h.col(|ui| { ui.strong(value_header); });
            h.col(|ui| { ui.strong("连续"); });
        })
        .body(|mut body| {
            for r in ranks {
                body.row(20.0, |mut row| {
                    row.col(|ui| { ui.label(r.rank_label()); });
                    row.col(|ui| { ui.label(format!("{} ({})", r.name, r.uid)); });
                    row.col(|ui| { ui.label(r.count.to_string()); });
                    row.col(|ui| { ui.label(r.continue_days.to_string()); });
                });
            }
        });
}

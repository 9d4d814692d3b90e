// src/gui/pages/activity.rs
use eframe::egui;
use egui_extras::{Column, TableBuilder};

use super::Page;
use crate::gui::app::App;
use crate::gui::components::pager;
use crate::router::Tab;

pub struct ActivityPage;
pub static PAGE: ActivityPage = ActivityPage;

const PAGE_SIZE: u32 = 20;

impl Page for ActivityPage {
    fn tab(&self) -> Tab { Tab::Activity }
    fn title(&self) -> &'static str { "活动" }

    fn on_enter(&self, app: &mut App) {
        let page = app.views.activity_page;
        let r = app.api().fetch_activity_team_leaderboard(page, PAGE_SIZE, None);
        app.views.activity = app.fetched("活动榜", r).unwrap_or_default();
    }

    fn draw(&self, ui: &mut egui::Ui, app: &mut App) {
        ui.heading("团队活动榜");
        let rows = &app.views.activity.list;
        if rows.is_empty() {
            ui.label("暂无数据");
        } else {
            TableBuilder::new(ui)
                .id_salt("activity")
                .striped(true)
                .vscroll(false)
                .column(Column::exact(60.0))
                .column(Column::remainder().clip(true))
                .column(Column::exact(70.0))
                .column(Column::exact(80.0))
                .column(Column::exact(90.0))
                .column(Column::exact(90.0))
                .header(20.0, |mut h| {
                    for title in ["排名", "团队", "人数", "得分", "打卡次数", "≥30天"] {
                        h.col(|ui| { ui.strong(title); });
                    }
                })
                .body(|mut body| {
                    for r in rows {
                        body.row(20.0, |mut row| {
                            row.col(|ui| { ui.label(r.rank.to_string()); });
                            row.col(|ui| { ui.label(&r.team_name); });
                            row.col(|ui| { ui.label(r.member_count.to_string()); });
                            row.col(|ui| { ui.label(format!("{:.1}", r.score)); });
                            row.col(|ui| { ui.label(r.clock_total_times.to_string()); });
                            row.col(|ui| { ui.label(r.ge30_count.to_string()); });
                        });
                    }
                });
        }

        let mut page = app.views.activity_page;
        if pager::draw(ui, &mut page, app.views.activity.total, PAGE_SIZE) {
            app.views.activity_page = page;
            self.on_enter(app);
        }
    }
}

// src/gui/pages/achievements.rs
use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};

use super::Page;
use crate::api::{format_badge_time, Badge};
use crate::gui::app::App;
use crate::gui::components::color32;
use crate::router::Tab;

pub struct AchievementsPage;
pub static PAGE: AchievementsPage = AchievementsPage;

/// 1 daily check-in, 2 solves, 3 everything else.
const BADGE_TYPES: [u32; 3] = [1, 2, 3];

fn type_label(t: u64) -> &'static str {
    match t {
        1 => "打卡",
        2 => "做题",
        _ => "其他",
    }
}

impl Page for AchievementsPage {
    fn tab(&self) -> Tab { Tab::Achievements }
    fn title(&self) -> &'static str { "成就" }

    fn on_enter(&self, app: &mut App) {
        let mut badges = app.api().fetch_badge_list(&BADGE_TYPES);
        badges.sort_by(|a, b| a.r#type.cmp(&b.r#type).then(a.acquirement.cmp(&b.acquirement)));
        app.views.badges = badges;
        app.views.badge_info = app.api().fetch_badge_user_info();
    }

    fn draw(&self, ui: &mut egui::Ui, app: &mut App) {
        if !app.state().is_logged_in() {
            ui.label("登录后查看自己的徽章");
        }
        let info = &app.views.badge_info;
        ui.heading(format!("积分 {}", info.total_points));
        if !info.recent.is_empty() {
            ui.label("最近获得");
            ui.horizontal_wrapped(|ui| {
                for b in &info.recent {
                    let when = if b.time.is_empty() { format_badge_time(b.create_time) } else { b.time.clone() };
                    ui.label(RichText::new(format!("{} {}", b.name, when)).color(color32("#faad14")));
                }
            });
        }
        ui.separator();
        badge_table(ui, &app.views.badges);
    }
}

fn badge_table(ui: &mut egui::Ui, badges: &[Badge]) {
    if badges.is_empty() {
        ui.label("暂无徽章");
        return;
    }
    let got = color32("#52c41a");
    TableBuilder::new(ui)
        .id_salt("badges")
        .striped(true)
        .vscroll(false)
        .column(Column::exact(60.0))
        .column(Column::initial(160.0).clip(true))
        .column(Column::remainder().clip(true))
        .column(Column::exact(60.0))
        .column(Column::exact(60.0))
        .header(20.0, |mut h| {
            for title in ["类型", "徽章", "条件", "积分", "状态"] {
                h.col(|ui| { ui.strong(title); });
            }
        })
        .body(|mut body| {
            for b in badges {
                body.row(20.0, |mut row| {
                    row.col(|ui| { ui.label(type_label(b.r#type)); });
                    row.col(|ui| { ui.label(&b.name); });
                    row.col(|ui| { ui.label(&b.detail); });
                    row.col(|ui| { ui.label(b.score.to_string()); });
                    row.col(|ui| {
                        if b.is_earned() {
                            ui.label(RichText::new("已获得").color(got));
                        } else {
                            ui.weak("未获得");
                        }
                    });
                });
            }
        });
}

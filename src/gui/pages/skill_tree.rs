// src/gui/pages/skill_tree.rs
use eframe::egui;
use egui_extras::{Column, TableBuilder};

use super::Page;
use crate::api::TagInfo;
use crate::gui::app::App;
use crate::router::Tab;

pub struct SkillTreePage;
pub static PAGE: SkillTreePage = SkillTreePage;

/// The endpoint answers either a fraction or a percentage.
pub fn progress_fraction(raw: f64) -> f32 {
    let f = if raw > 1.0 { raw / 100.0 } else { raw };
    f.clamp(0.0, 1.0) as f32
}

fn lookup(app: &mut App) {
    let tag = s!(app.state().gui.skill_tag_id.trim());
    if tag.is_empty() {
        return;
    }
    let info = app.api().fetch_tag_info(&tag);
    app.views.tag_info = app.fetched("技能树", info);
    let uid = app.target_uid();
    app.views.tag_progress = app.api().fetch_single_tag_progress(&uid, &tag);
}

impl Page for SkillTreePage {
    fn tab(&self) -> Tab { Tab::SkillTree }
    fn title(&self) -> &'static str { "技能树" }

    fn on_enter(&self, app: &mut App) {
        if app.views.tag_info.is_none() {
            lookup(app);
        }
    }

    fn draw(&self, ui: &mut egui::Ui, app: &mut App) {
        ui.horizontal(|ui| {
            ui.label("Tag");
            ui.add(egui::TextEdit::singleline(&mut app.tracker.state.gui.skill_tag_id).desired_width(100.0));
            if ui.button("查询").clicked() {
                lookup(app);
            }
            if ui.button("同步进度").clicked() {
                let uid = app.target_uid();
                let tag = s!(app.state().gui.skill_tag_id.trim());
                let tag = (!tag.is_empty()).then_some(tag);
                let r = app.api().sync_skill_tree(&uid, tag.as_deref());
                if app.report("同步", r).is_some() {
                    lookup(app);
                }
            }
        });
        ui.separator();

        let Some(info) = &app.views.tag_info else {
            ui.label("输入知识点 tag 查询");
            return;
        };
        ui.heading(&info.tag_name);
        if !info.tag_desc.is_empty() {
            ui.label(&info.tag_desc);
        }
        ui.add(egui::ProgressBar::new(progress_fraction(app.views.tag_progress)).show_percentage());
        tag_table(ui, app, info);
    }
}

fn tag_table(ui: &mut egui::Ui, app: &App, info: &TagInfo) {
    TableBuilder::new(ui)
        .id_salt(("skill_tree", info.tag_id.as_str()))
        .striped(true)
        .vscroll(false)
        .column(Column::initial(260.0).resizable(true).clip(true))
        .column(Column::exact(60.0))
        .column(Column::remainder().clip(true))
        .header(20.0, |mut h| {
            h.col(|ui| { ui.strong("题目"); });
            h.col(|ui| { ui.strong("分值"); });
            h.col(|ui| { ui.strong("前置"); });
        })
        .body(|mut body| {
            for p in &info.problems {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        let url = join!("https://www.nowcoder.com/practice/", &p.uuid);
                        if p.uuid.is_empty() {
                            ui.label(&p.name);
                        } else {
                            ui.hyperlink_to(&p.name, app.tracker.link(&url));
                        }
                    });
                    row.col(|ui| { ui.label(p.score.to_string()); });
                    row.col(|ui| { ui.label(p.dependencies.join(", ")); });
                });
            }
        });
}

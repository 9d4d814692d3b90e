// src/gui/pages/admin.rs
//
// Tracker admin tools: daily-problem schedule, battle problem pool, per-user
// maintenance and the crawlers. Route is gated; this page assumes an admin.

use chrono::{Datelike, Local};
use eframe::egui;
use egui_extras::{Column, TableBuilder};

use super::Page;
use crate::api::ClockQuestion;
use crate::gui::app::App;
use crate::gui::components::pager;
use crate::gui::crawl::{self, Crawl};
use crate::router::Tab;

pub struct AdminPage;
pub static PAGE: AdminPage = AdminPage;

const CLOCK_PAGE_SIZE: u32 = 20;

fn load_clock(app: &mut App) {
    let page = app.views.admin_clock_page;
    let r = app.api().admin_clock_question_list(page, CLOCK_PAGE_SIZE);
    app.views.admin_clock = app.fetched("每日一题列表", r).unwrap_or_default();
}

fn load_battle(app: &mut App) {
    let r = app.api().admin_battle_problem_list(&app.views.admin_battle_query);
    app.views.admin_battle = app.fetched("对战题库", r).unwrap_or_default();
}

impl Page for AdminPage {
    fn tab(&self) -> Tab { Tab::Admin }
    fn title(&self) -> &'static str { "管理" }

    fn on_enter(&self, app: &mut App) {
        if app.views.admin_year.is_empty() {
            app.views.admin_year = Local::now().year().to_string();
        }
        load_clock(app);
        load_battle(app);
    }

    fn draw(&self, ui: &mut egui::Ui, app: &mut App) {
        egui::CollapsingHeader::new("每日一题").default_open(true).show(ui, |ui| clock_section(ui, app));
        egui::CollapsingHeader::new("对战题库").default_open(true).show(ui, |ui| battle_section(ui, app));
        egui::CollapsingHeader::new("用户维护").show(ui, |ui| user_section(ui, app));
        egui::CollapsingHeader::new("数据抓取").show(ui, |ui| crawl_section(ui, app));
    }
}

/* ---------- daily problem schedule ---------- */

enum ClockAction {
    Edit(ClockQuestion),
    Delete(String),
}

fn clock_section(ui: &mut egui::Ui, app: &mut App) {
    let mut action = None;
    TableBuilder::new(ui)
        .id_salt("admin_clock")
        .striped(true)
        .vscroll(false)
        .column(Column::exact(100.0))
        .column(Column::exact(90.0))
        .column(Column::exact(90.0))
        .column(Column::remainder().clip(true))
        .column(Column::exact(100.0))
        .header(20.0, |mut h| {
            for title in ["日期", "questionId", "problemId", "分享链接", ""] {
                h.col(|ui| { ui.strong(title); });
            }
        })
        .body(|mut body| {
            for q in &app.views.admin_clock.list {
                body.row(22.0, |mut row| {
                    row.col(|ui| { ui.label(&q.date); });
                    row.col(|ui| { ui.label(&q.question_id); });
                    row.col(|ui| { ui.label(&q.problem_id); });
                    row.col(|ui| { ui.label(&q.share_link); });
                    row.col(|ui| {
                        if ui.small_button("编辑").clicked() {
                            action = Some(ClockAction::Edit(q.clone()));
                        }
                        if ui.small_button("删除").clicked() {
                            action = Some(ClockAction::Delete(q.id.clone()));
                        }
                    });
                });
            }
        });
    match action {
        Some(ClockAction::Edit(q)) => app.views.admin_clock_edit = q,
        Some(ClockAction::Delete(id)) => {
            let r = app.api().admin_clock_question_delete(&id);
            if app.report("删除", r).is_some() {
                load_clock(app);
            }
        }
        None => {}
    }

    let mut page = app.views.admin_clock_page;
    if pager::draw(ui, &mut page, app.views.admin_clock.total, CLOCK_PAGE_SIZE) {
        app.views.admin_clock_page = page;
        load_clock(app);
    }
    ui.separator();

    let edit = &mut app.views.admin_clock_edit;
    ui.horizontal(|ui| {
        ui.add(egui::TextEdit::singleline(&mut edit.date).hint_text("YYYY-MM-DD").desired_width(100.0));
        ui.add(egui::TextEdit::singleline(&mut edit.question_id).hint_text("questionId").desired_width(90.0));
        ui.add(egui::TextEdit::singleline(&mut edit.problem_id).hint_text("problemId").desired_width(90.0));
        ui.add(egui::TextEdit::singleline(&mut edit.share_link).hint_text("分享链接"));
    });
    ui.horizontal(|ui| {
        let q = app.views.admin_clock_edit.clone();
        if ui.button("新增").clicked() {
            let r = app.api().admin_clock_question_add(&q);
            if app.report("新增", r).is_some() {
                load_clock(app);
            }
        }
        if ui.add_enabled(!q.id.is_empty(), egui::Button::new("更新")).clicked() {
            let r = app.api().admin_clock_question_update(&q);
            if app.report("更新", r).is_some() {
                load_clock(app);
            }
        }
        if ui.button("按日期读取").clicked() {
            let r = app.api().admin_clock_question_get(&q.date);
            match app.fetched("读取", r) {
                Some(Some(found)) => app.views.admin_clock_edit = found,
                Some(None) => app.status(format!("{} 没有安排题目", q.date)),
                None => {}
            }
        }
        if ui.button("清空").clicked() {
            app.views.admin_clock_edit = ClockQuestion::default();
        }
    });

    ui.horizontal(|ui| {
        ui.label("题解视频");
        ui.add(egui::TextEdit::singleline(&mut app.tracker.state.gui.admin_date_input).hint_text("YYYY-MM-DD").desired_width(100.0));
        ui.add(egui::TextEdit::singleline(&mut app.tracker.state.gui.admin_share_link_input).hint_text("链接或 <iframe>"));
        if ui.button("保存").clicked() {
            let gui = &app.state().gui;
            let r = app.api().set_daily_share_link(&gui.admin_date_input, &gui.admin_share_link_input);
            app.report("题解视频", r);
        }
    });
}

/* ---------- battle pool ---------- */

fn battle_section(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        let q = &mut app.views.admin_battle_query;
        let mut min = q.level_min.map(|v| v.to_string()).unwrap_or_default();
        let mut max = q.level_max.map(|v| v.to_string()).unwrap_or_default();
        ui.label("难度");
        ui.add(egui::TextEdit::singleline(&mut min).hint_text("min").desired_width(60.0));
        ui.add(egui::TextEdit::singleline(&mut max).hint_text("max").desired_width(60.0));
        q.level_min = min.trim().parse().ok();
        q.level_max = max.trim().parse().ok();
        ui.checkbox(&mut q.desc, "倒序");
        if ui.button("查询").clicked() {
            app.views.admin_battle_query.page = 1;
            load_battle(app);
        }
    });

    let mut delete = None;
    TableBuilder::new(ui)
        .id_salt("admin_battle")
        .striped(true)
        .vscroll(false)
        .column(Column::exact(70.0))
        .column(Column::exact(90.0))
        .column(Column::remainder().clip(true))
        .column(Column::exact(70.0))
        .column(Column::exact(60.0))
        .header(20.0, |mut h| {
            for title in ["id", "problemId", "标题", "难度分", ""] {
                h.col(|ui| { ui.strong(title); });
            }
        })
        .body(|mut body| {
            for p in &app.views.admin_battle.list {
                body.row(22.0, |mut row| {
                    row.col(|ui| { ui.label(&p.id); });
                    row.col(|ui| { ui.label(&p.problem_id); });
                    row.col(|ui| { ui.label(&p.title); });
                    row.col(|ui| { ui.label(p.level_score.to_string()); });
                    row.col(|ui| {
                        if ui.small_button("删除").clicked() {
                            delete = Some(p.id.clone());
                        }
                    });
                });
            }
        });
    if let Some(id) = delete {
        let r = app.api().admin_battle_problem_delete(&id);
        if app.report("删除", r).is_some() {
            load_battle(app);
        }
    }

    let limit = app.views.admin_battle_query.limit;
    let mut page = app.views.admin_battle_query.page;
    if pager::draw(ui, &mut page, app.views.admin_battle.total, limit) {
        app.views.admin_battle_query.page = page;
        load_battle(app);
    }

    ui.horizontal(|ui| {
        ui.add(egui::TextEdit::singleline(&mut app.views.admin_problem_id).hint_text("problemId").desired_width(90.0));
        ui.add(egui::TextEdit::singleline(&mut app.views.admin_level_score).hint_text("难度分").desired_width(70.0));
        if ui.button("加入题库").clicked() {
            match app.views.admin_level_score.trim().parse::<u32>() {
                Ok(score) => {
                    let r = app.api().admin_battle_problem_add(app.views.admin_problem_id.trim(), score);
                    if app.report("加入题库", r).is_some() {
                        load_battle(app);
                    }
                }
                Err(_) => app.status("难度分需为整数"),
            }
        }
    });
}

/* ---------- users ---------- */

fn user_section(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        ui.label("UID");
        ui.add(egui::TextEdit::singleline(&mut app.tracker.state.gui.admin_user_input).desired_width(120.0));
        ui.label("年份");
        ui.add(egui::TextEdit::singleline(&mut app.views.admin_year).desired_width(60.0));
    });
    let uid = s!(app.state().gui.admin_user_input.trim());
    if uid.is_empty() {
        ui.label("先输入用户 UID");
        return;
    }

    ui.horizontal(|ui| {
        if ui.button("更新 AC 数").clicked() {
            let r = app.api().admin_update_accept_count(&uid);
            app.report("更新 AC 数", r);
        }
        if ui.button("清除对战镜像").clicked() {
            let r = app.api().admin_clear_user_mirrors(&uid);
            app.report("清除对战镜像", r);
        }
        if ui.button("补打卡").clicked() {
            let r = app.api().add_checkin(&uid);
            app.report("补打卡", r);
        }
        if ui.button("年度报告").clicked() {
            let year = app.views.admin_year.trim().parse().unwrap_or_else(|_| Local::now().year());
            let r = app.api().admin_year_report(&uid, year, true);
            if let Some(v) = app.fetched("年度报告", r) {
                app.views.admin_report = serde_json::to_string_pretty(&v).unwrap_or_default();
            }
        }
    });
    if !app.views.admin_report.is_empty() {
        ui.add(egui::TextEdit::multiline(&mut app.views.admin_report.as_str()).code_editor().desired_rows(12));
    }
}

/* ---------- crawlers ---------- */

fn crawl_section(ui: &mut egui::Ui, app: &mut App) {
    let busy = app.crawling.load(std::sync::atomic::Ordering::SeqCst);
    ui.horizontal(|ui| {
        for which in [Crawl::Weekly, Crawl::Clist] {
            let label = match which {
                Crawl::Weekly => "抓取牛客周赛",
                Crawl::Clist => "抓取 clist 题目",
            };
            if ui.add_enabled(!busy, egui::Button::new(label)).clicked() {
                crawl::start(app, which);
            }
        }
        if busy {
            ui.spinner();
        }
    });
    ui.label(app.status_text());
}

// src/gui/pages/daily.rs
//
// Today's problem, check-in, streak counters and the month calendar.

use chrono::{Datelike, Local, Months, NaiveDate};
use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};

use super::Page;
use crate::api::MonthProblem;
use crate::config::consts::{CHECK_IN_BONUS_INTERVAL, CHECK_IN_DAILY, CHECK_IN_WEEKLY_BONUS};
use crate::config::state::LoadModule;
use crate::events::Event;
use crate::gui::app::App;
use crate::gui::components::color32;
use crate::router::Tab;

pub struct DailyPage;
pub static PAGE: DailyPage = DailyPage;

const WEEKDAYS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

/// Coins earned today: the daily reward once checked in, plus the bonus on
/// every full week of streak.
pub fn today_coins(checked_today: bool, consecutive: u64) -> u32 {
    if !checked_today {
        return 0;
    }
    let interval = u64::from(CHECK_IN_BONUS_INTERVAL);
    let bonus = consecutive > 0 && consecutive % interval == 0;
    CHECK_IN_DAILY + if bonus { CHECK_IN_WEEKLY_BONUS } else { 0 }
}

/// Sunday-first weeks of the month starting at `first`; `None` pads the edges.
pub fn month_grid(first: NaiveDate) -> Vec<[Option<u32>; 7]> {
    let first = first.with_day(1).unwrap_or(first);
    let days = first
        .checked_add_months(Months::new(1))
        .map(|next| next.signed_duration_since(first).num_days() as u32)
        .unwrap_or(31);
    let lead = first.weekday().num_days_from_sunday() as usize;

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    for d in 1..=days {
        let slot = (lead + d as usize - 1) % 7;
        week[slot] = Some(d);
        if slot == 6 {
            weeks.push(week);
            week = [None; 7];
        }
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }
    weeks
}

pub fn date_key(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

fn problem_on<'a>(problems: &'a [MonthProblem], key: &str) -> Option<&'a MonthProblem> {
    problems.iter().find(|p| p.date.get(..10).unwrap_or(&p.date) == key)
}

fn load_month(app: &mut App) {
    let first = app.state().calendar_date;
    let (y, m) = (first.year(), first.month());
    app.views.month_problems = app.api().fetch_month_info(y, m);
    let mut checked = app.api().fetch_check_in_list(y, m);
    checked.extend(app.state().simulated_check_ins.iter().cloned());
    app.views.checked_days = checked;
}

fn check_in(app: &mut App) {
    let Some(today) = app.state().current_daily_problem.clone() else { return };
    if !app.state().is_logged_in() {
        app.tracker.push_alert("请先登录牛客");
        return;
    }
    let done = app.api().check_in_daily_problem(&today.question_id);
    if app.report("打卡", done).is_none() {
        return;
    }
    let key = date_key(Local::now().date_naive());
    app.state_mut().simulated_check_ins.insert(key.clone());
    app.views.checked_days.insert(key);
    if let Some(p) = app.state_mut().current_daily_problem.as_mut() {
        p.checked_today = true;
    }
    app.views.check_in_stats = app.api().fetch_check_in_stats();
    app.tracker.bus.emit(&Event::CheckInSuccess { question_id: today.question_id });
}

impl Page for DailyPage {
    fn tab(&self) -> Tab { Tab::Daily }
    fn title(&self) -> &'static str { "每日一题" }

    fn on_enter(&self, app: &mut App) {
        let env = app.load(LoadModule::Daily, |api| api.fetch_daily_today_info());
        let today = env.and_then(|e| e.data);
        if let Some(t) = &today {
            let question_id = t.question_id.clone();
            app.tracker.bus.emit(&Event::DailyProblemLoaded { question_id });
        }
        let date = today.as_ref().map(|t| t.date.clone()).unwrap_or_else(|| date_key(Local::now().date_naive()));
        app.state_mut().set_current_daily_problem(today);

        app.views.check_in_stats = app.api().fetch_check_in_stats();
        let link = app.api().fetch_daily_day_link(&date);
        app.views.day_link = (!link.src.is_empty()).then_some(link);
        load_month(app);
    }

    fn draw(&self, ui: &mut egui::Ui, app: &mut App) {
        if app.state().is_loading(LoadModule::Daily) {
            ui.spinner();
        }

        match app.state().current_daily_problem.clone() {
            Some(p) => {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&p.date).weak());
                    ui.hyperlink_to(RichText::new(&p.question_title).heading(), app.tracker.link(&p.question_url));
                });
                ui.horizontal(|ui| {
                    if p.checked_today {
                        ui.label(RichText::new("✔ 今日已打卡").color(color32("#52c41a")));
                    } else if ui.button("打卡").clicked() {
                        check_in(app);
                    }
                });
            }
            None => { ui.label("今日题目暂不可用"); }
        }

        let checked_today = app.state().current_daily_problem.as_ref().is_some_and(|p| p.checked_today);
        if let Some(stats) = app.views.check_in_stats {
            ui.label(format!(
                "连续打卡 {} 天 · 累计 {} 天 · 今日可得 {} 牛币",
                stats.consecutive_days,
                stats.total_days,
                today_coins(checked_today, stats.consecutive_days)
            ));
        }
        if let Some(link) = &app.views.day_link {
            ui.hyperlink_to("题解视频", &link.src);
        }
        ui.separator();

        let first = app.state().calendar_date;
        ui.horizontal(|ui| {
            if ui.button("‹").clicked() {
                app.state_mut().shift_calendar_month(-1);
                load_month(app);
            }
            ui.strong(first.format("%Y-%m").to_string());
            if ui.button("›").clicked() {
                app.state_mut().shift_calendar_month(1);
                load_month(app);
            }
        });
        calendar(ui, app, first);
    }
}

fn calendar(ui: &mut egui::Ui, app: &App, first: NaiveDate) {
    let weeks = month_grid(first);
    let ac = color32("#52c41a");
    let mut table = TableBuilder::new(ui).id_salt("daily_calendar").vscroll(false);
    for _ in 0..7 {
        table = table.column(Column::initial(110.0).clip(true));
    }
    table
        .header(20.0, |mut h| {
            for d in WEEKDAYS {
                h.col(|ui| { ui.strong(d); });
            }
        })
        .body(|mut body| {
            for week in &weeks {
                body.row(44.0, |mut row| {
                    for day in week {
                        row.col(|ui| {
                            let Some(d) = day else { return };
                            let Some(date) = first.with_day(*d) else { return };
                            let key = date_key(date);
                            ui.vertical(|ui| {
                                if app.views.checked_days.contains(&key) {
                                    ui.label(RichText::new(format!("{d} ✔")).color(ac));
                                } else {
                                    ui.label(d.to_string());
                                }
                                if let Some(p) = problem_on(&app.views.month_problems, &key) {
                                    ui.hyperlink_to(
                                        RichText::new(&p.question_title).small(),
                                        app.tracker.link(&p.question_url),
                                    );
                                }
                            });
                        });
                    }
                });
            }
        });
}

// src/gui/pages/team.rs
//
// Team home (my teams, sent requests, received invites) and, once a team is
// picked, its dashboard, members and invite management.
// Sub-tab switches go through the shell so `TeamTabChanged` drives reloads.

use std::error::Error;

use eframe::egui;
use egui_extras::{Column, TableBuilder};
use serde_json::Value;

use super::Page;
use crate::api::{TeamApplication, TeamBoard, TeamRole};
use crate::gui::app::App;
use crate::gui::components::tabs;
use crate::router::Tab;

pub struct TeamPage;
pub static PAGE: TeamPage = TeamPage;

const HOME_TABS: [(&str, &str); 3] = [("mine", "我的团队"), ("applying", "我的申请"), ("invited", "收到的邀请")];
const TEAM_TABS: [(&str, &str); 3] = [("dashboard", "概览"), ("members", "成员"), ("invites", "申请与邀请")];
const BOARDS: [(&str, &str); 2] = [("total", "做题榜"), ("checkin", "打卡榜")];

const MEMBERS_LIMIT: u32 = 50;
const BOARD_LIMIT: u32 = 20;
const APPLY_LIMIT: u32 = 50;

fn is_team_tab(tab: &str) -> bool {
    TEAM_TABS.iter().any(|(k, _)| *k == tab)
}

fn my_role(app: &App, team_id: &str) -> TeamRole {
    app.views
        .my_teams
        .iter()
        .find(|t| t.team_id == team_id)
        .map(|t| t.role())
        .unwrap_or_default()
}

/// Run a mutation, report it, and reload the current sub-tab when it went through.
fn act(app: &mut App, what: &str, r: Result<Value, Box<dyn Error>>) {
    if app.report(what, r).is_some() {
        PAGE.on_enter(app);
    }
}

fn open_team(app: &mut App, team_id: &str) {
    app.views.selected_team = Some(s!(team_id));
    app.tracker.switch_team_tab("dashboard");
}

fn leave_team(app: &mut App) {
    app.views.selected_team = None;
    app.tracker.switch_team_tab("mine");
}

impl Page for TeamPage {
    fn tab(&self) -> Tab { Tab::Team }
    fn title(&self) -> &'static str { "团队" }

    fn on_enter(&self, app: &mut App) {
        if !app.state().is_logged_in() {
            return;
        }
        let tab = app.views.team_tab.clone();
        let team = app.views.selected_team.clone();
        match (tab.as_str(), team) {
            ("dashboard", Some(id)) => {
                let summary = app.api().fetch_team_summary(&id);
                app.views.team_summary = app.fetched("团队概览", summary);
                let board = app.views.team_board;
                let rows = app.api().fetch_team_leaderboard(&id, board, 1, BOARD_LIMIT);
                app.views.team_leaderboard = app.fetched("团队排行", rows).unwrap_or_default();
            }
            ("members", Some(id)) => {
                let members = app.api().fetch_team_members(&id, 1, MEMBERS_LIMIT);
                app.views.team_members = app.fetched("成员", members).unwrap_or_default();
            }
            ("invites", Some(id)) => {
                app.views.team_applications = app.api().fetch_team_applications(&id, APPLY_LIMIT);
                app.views.team_invites = app.api().fetch_team_invites(&id, APPLY_LIMIT);
            }
            ("applying", _) => app.views.my_applications = app.api().fetch_my_applications(),
            ("invited", _) => app.views.my_invites = app.api().fetch_my_invites(),
            _ => app.views.my_teams = app.api().fetch_my_teams(),
        }
    }

    fn draw(&self, ui: &mut egui::Ui, app: &mut App) {
        if !app.state().is_logged_in() {
            ui.label("登录牛客后可使用团队功能");
            return;
        }
        let tab = app.views.team_tab.clone();

        match app.views.selected_team.clone() {
            Some(team_id) => {
                ui.horizontal(|ui| {
                    if ui.button("‹ 返回").clicked() {
                        leave_team(app);
                    }
                    let name = app.views.team_summary.as_ref().map(|s| s.name.clone()).unwrap_or_default();
                    ui.strong(name);
                });
                if let Some(key) = tabs::sub_tabs(ui, &tab, &TEAM_TABS) {
                    app.tracker.switch_team_tab(key);
                }
                ui.separator();
                match tab.as_str() {
                    "members" => members(ui, app, &team_id),
                    "invites" => invites(ui, app, &team_id),
                    _ => dashboard(ui, app, &team_id),
                }
            }
            None => {
                let tab = if is_team_tab(&tab) { s!("mine") } else { tab };
                if let Some(key) = tabs::sub_tabs(ui, &tab, &HOME_TABS) {
                    app.tracker.switch_team_tab(key);
                }
                ui.separator();
                match tab.as_str() {
                    "applying" => applications(ui, &app.views.my_applications),
                    "invited" => my_invites(ui, app),
                    _ => my_teams(ui, app),
                }
            }
        }
    }
}

/* ---------- home ---------- */

fn my_teams(ui: &mut egui::Ui, app: &mut App) {
    let mut open = None;
    if app.views.my_teams.is_empty() {
        ui.label("还没有加入任何团队");
    }
    for t in &app.views.my_teams {
        ui.horizontal(|ui| {
            ui.strong(&t.name);
            ui.label(format!("{}/{} 人 · {}", t.person_count, t.person_limit, t.role().label()));
            if ui.button("进入").clicked() {
                open = Some(t.team_id.clone());
            }
        });
    }
    if let Some(id) = open {
        open_team(app, &id);
        return;
    }
    ui.separator();

    ui.horizontal(|ui| {
        ui.label("创建团队");
        ui.add(egui::TextEdit::singleline(&mut app.tracker.state.gui.team_name_input).hint_text("名称"));
        ui.add(egui::TextEdit::singleline(&mut app.tracker.state.gui.team_desc_input).hint_text("简介"));
        if ui.button("创建").clicked() {
            let gui = &app.state().gui;
            let r = app.api().create_team(&gui.team_name_input, &gui.team_desc_input);
            act(app, "创建团队", r);
        }
    });
    ui.horizontal(|ui| {
        ui.label("申请加入");
        ui.add(egui::TextEdit::singleline(&mut app.views.apply_team_id).hint_text("团队 ID").desired_width(100.0));
        ui.add(egui::TextEdit::singleline(&mut app.tracker.state.gui.team_apply_message).hint_text("留言"));
        if ui.button("申请").clicked() {
            let id = s!(app.views.apply_team_id.trim());
            let r = app.api().apply_to_team(&id, &app.state().gui.team_apply_message);
            app.report("申请加入", r);
        }
    });
}

fn applications(ui: &mut egui::Ui, items: &[TeamApplication]) {
    if items.is_empty() {
        ui.label("暂无记录");
    }
    for a in items {
        ui.horizontal(|ui| {
            ui.strong(&a.team_name);
            ui.label(&a.message);
            ui.label(&a.status_text);
        });
    }
}

fn my_invites(ui: &mut egui::Ui, app: &mut App) {
    let mut answer: Option<(String, bool)> = None;
    if app.views.my_invites.is_empty() {
        ui.label("暂无邀请");
    }
    for inv in &app.views.my_invites {
        ui.horizontal(|ui| {
            ui.strong(&inv.team_name);
            ui.label(format!("来自 {}", inv.owner_name));
            if ui.button("接受").clicked() {
                answer = Some((inv.id.clone(), true));
            }
            if ui.button("拒绝").clicked() {
                answer = Some((inv.id.clone(), false));
            }
        });
    }
    match answer {
        Some((id, true)) => {
            let r = app.api().accept_invite(&id);
            act(app, "接受邀请", r);
        }
        Some((id, false)) => {
            let r = app.api().decline_invite(&id);
            act(app, "拒绝邀请", r);
        }
        None => {}
    }
}

/* ---------- one team ---------- */

fn dashboard(ui: &mut egui::Ui, app: &mut App, team_id: &str) {
    if let Some(s) = &app.views.team_summary {
        ui.label(format!("成员 {}/{}", s.member_count, s.person_limit));
        ui.label(format!(
            "累计 AC {} · 今日 AC {} · 近 7 天 AC {} · 今日打卡 {}",
            s.total_accept_count, s.today_accept_count, s.seven_days_accept_count, s.today_clock_count
        ));
    }
    ui.separator();

    let board = app.views.team_board;
    if let Some(key) = tabs::sub_tabs(ui, board.name(), &BOARDS) {
        app.views.team_board = if key == "checkin" { TeamBoard::Checkin } else { TeamBoard::Total };
        PAGE.on_enter(app);
        return;
    }
    let value_header = match board {
        TeamBoard::Total => "AC",
        TeamBoard::Checkin => "打卡天数",
    };
    TableBuilder::new(ui)
        .id_salt(("team_board", team_id))
        .striped(true)
        .vscroll(false)
        .column(Column::exact(60.0))
        .column(Column::remainder().clip(true))
        .column(Column::exact(90.0))
        .header(20.0, |mut h| {
            h.col(|ui| { ui.strong("排名"); });
            h.col(|ui| { ui.strong("成员"); });
            h.col(|ui| { ui.strong(value_header); });
        })
        .body(|mut body| {
            for r in &app.views.team_leaderboard.list {
                body.row(20.0, |mut row| {
                    row.col(|ui| { ui.label(r.rank.to_string()); });
                    row.col(|ui| { ui.label(format!("{} ({})", r.name, r.user_id)); });
                    row.col(|ui| { ui.label(r.value().to_string()); });
                });
            }
        });
}

enum MemberAction {
    Remove(String),
    Transfer(String),
}

fn members(ui: &mut egui::Ui, app: &mut App, team_id: &str) {
    let role = my_role(app, team_id);
    let me = app.state().logged_in_user_id.clone().unwrap_or_default();
    let mut action = None;

    ui.label(format!("共 {} 人", app.views.team_members.total));
    TableBuilder::new(ui)
        .id_salt(("team_members", team_id))
        .striped(true)
        .vscroll(false)
        .column(Column::remainder().clip(true))
        .column(Column::exact(70.0))
        .column(Column::exact(70.0))
        .column(Column::exact(70.0))
        .column(Column::exact(140.0))
        .header(20.0, |mut h| {
            for title in ["成员", "角色", "AC", "今日打卡", ""] {
                h.col(|ui| { ui.strong(title); });
            }
        })
        .body(|mut body| {
            for m in &app.views.team_members.list {
                body.row(22.0, |mut row| {
                    row.col(|ui| { ui.label(format!("{} ({})", m.name, m.user_id)); });
                    row.col(|ui| { ui.label(m.role().label()); });
                    row.col(|ui| { ui.label(m.accept_count.to_string()); });
                    row.col(|ui| { ui.label(if m.checked_today { "✔" } else { "" }); });
                    row.col(|ui| {
                        if m.user_id == me || m.role() == TeamRole::Owner {
                            return;
                        }
                        if role.can_manage() && ui.small_button("移除").clicked() {
                            action = Some(MemberAction::Remove(m.user_id.clone()));
                        }
                        if role == TeamRole::Owner && ui.small_button("转让").clicked() {
                            action = Some(MemberAction::Transfer(m.user_id.clone()));
                        }
                    });
                });
            }
        });

    match action {
        Some(MemberAction::Remove(uid)) => {
            let r = app.api().remove_member(team_id, &uid);
            act(app, "移除成员", r);
        }
        Some(MemberAction::Transfer(uid)) => {
            let r = app.api().transfer_ownership(team_id, &uid);
            if app.report("转让团队", r).is_some() {
                app.views.my_teams = app.api().fetch_my_teams();
                PAGE.on_enter(app);
            }
        }
        None => {}
    }
    ui.separator();

    ui.horizontal(|ui| {
        if role == TeamRole::Owner {
            if ui.button("解散团队").clicked() {
                let r = app.api().disband_team(team_id);
                if app.report("解散团队", r).is_some() {
                    leave_team(app);
                }
            }
        } else if ui.button("退出团队").clicked() {
            let r = app.api().quit_team(team_id);
            if app.report("退出团队", r).is_some() {
                leave_team(app);
            }
        }
    });
}

fn invites(ui: &mut egui::Ui, app: &mut App, team_id: &str) {
    let role = my_role(app, team_id);
    if role.can_manage() {
        ui.horizontal(|ui| {
            ui.label("邀请用户");
            ui.add(egui::TextEdit::singleline(&mut app.tracker.state.gui.invite_uid_input).hint_text("UID").desired_width(120.0));
            if ui.button("邀请").clicked() {
                let uid = s!(app.state().gui.invite_uid_input.trim());
                let r = app.api().invite_user(team_id, &uid);
                act(app, "邀请", r);
            }
        });
        ui.separator();
    }

    ui.strong("入队申请");
    let mut answer: Option<(String, bool)> = None;
    if app.views.team_applications.is_empty() {
        ui.label("暂无申请");
    }
    for a in &app.views.team_applications {
        ui.horizontal(|ui| {
            ui.label(format!("{} ({})", a.apply_user_name, a.apply_uid));
            ui.label(&a.message);
            if role.can_manage() {
                if ui.button("同意").clicked() {
                    answer = Some((a.id.clone(), true));
                }
                if ui.button("拒绝").clicked() {
                    answer = Some((a.id.clone(), false));
                }
            }
        });
    }
    match answer {
        Some((id, true)) => {
            let r = app.api().approve_application(&id);
            act(app, "同意申请", r);
        }
        Some((id, false)) => {
            let r = app.api().reject_application(&id);
            act(app, "拒绝申请", r);
        }
        None => {}
    }
    ui.separator();

    ui.strong("已发出的邀请");
    applications(ui, &app.views.team_invites);
}

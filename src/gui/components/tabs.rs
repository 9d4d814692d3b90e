// src/gui/components/tabs.rs
//
// Main tab strip plus the hash box. Switching goes through the shell so the
// gates, the hash and the events stay in one place.

use eframe::egui;

use crate::gui::app::App;
use crate::router::{ProblemsView, Tab, ALL_TABS};

fn label(tab: Tab) -> &'static str {
    match tab {
        Tab::Daily        => "每日一题",
        Tab::Problems     => "题库",
        Tab::Rankings     => "排行榜",
        Tab::SkillTree    => "技能树",
        Tab::Achievements => "成就",
        Tab::Team         => "团队",
        Tab::Profile      => "个人",
        Tab::Faq          => "FAQ",
        Tab::Changelog    => "更新日志",
        Tab::Battle       => "对战",
        Tab::Activity     => "活动",
        Tab::Prompt       => "Prompt",
        Tab::Admin        => "管理",
        Tab::Ai           => "AI 助手",
    }
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let cur = app.state().active_main_tab;
        for tab in ALL_TABS {
            // admin entry only shows for admins; the gate still guards the route
            if tab == Tab::Admin && !app.state().is_admin {
                continue;
            }
            let selected = tab == cur;
            if ui.selectable_label(selected, label(tab)).clicked() && !selected {
                logf!("UI: Tab switch {} → {}", cur, tab);
                let sub = (tab == Tab::Problems).then_some(app.state().active_view);
                app.tracker.switch_main_tab(tab.name(), sub);
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let r = ui.add(
                egui::TextEdit::singleline(&mut app.hash_input)
                    .hint_text("#/route")
                    .desired_width(180.0),
            );
            if r.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                let hash = app.hash_input.clone();
                app.tracker.on_hash_change(&hash);
            }
        });
    });
}

/// Contests / practice / interview switcher shown on the problems pages.
pub fn problems_views(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        let cur = app.state().active_view;
        for (view, text) in [
            (ProblemsView::Contests, "比赛"),
            (ProblemsView::Practice, "专项练习"),
            (ProblemsView::Interview, "面试"),
        ] {
            if ui.selectable_label(cur == view, text).clicked() && cur != view {
                app.tracker.switch_problems_view(view);
            }
        }
    });
}

/// Row of sub-tab buttons; returns the clicked key when it differs from `active`.
pub fn sub_tabs<'a>(ui: &mut egui::Ui, active: &str, items: &[(&'a str, &'a str)]) -> Option<&'a str> {
    let mut picked = None;
    ui.horizontal_wrapped(|ui| {
        for (key, text) in items {
            if ui.selectable_label(*key == active, *text).clicked() && *key != active {
                picked = Some(*key);
            }
        }
    });
    picked
}

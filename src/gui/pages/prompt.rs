// src/gui/pages/prompt.rs
use eframe::egui::{self, RichText};

use super::Page;
use crate::gui::app::App;
use crate::gui::components::color32;
use crate::router::Tab;

pub struct PromptPage;
pub static PAGE: PromptPage = PromptPage;

impl Page for PromptPage {
    fn tab(&self) -> Tab { Tab::Prompt }
    fn title(&self) -> &'static str { "Prompt 挑战" }

    fn on_enter(&self, app: &mut App) {
        let r = app.api().prompt_challenge_list();
        app.views.challenges = app.fetched("挑战列表", r).unwrap_or_default();
        let still_there = app
            .views
            .selected_challenge
            .as_ref()
            .is_some_and(|id| app.views.challenges.iter().any(|c| &c.id == id));
        if !still_there {
            app.views.selected_challenge = app.views.challenges.first().map(|c| c.id.clone());
            app.views.evaluation = None;
        }
    }

    fn draw(&self, ui: &mut egui::Ui, app: &mut App) {
        let selected = app.views.selected_challenge.clone().unwrap_or_default();
        let mut picked = None;
        ui.horizontal_wrapped(|ui| {
            for c in &app.views.challenges {
                if ui.selectable_label(c.id == selected, &c.title).clicked() && c.id != selected {
                    picked = Some(c.id.clone());
                }
            }
        });
        if let Some(id) = picked {
            app.views.selected_challenge = Some(id);
            app.views.evaluation = None;
        }

        let Some(challenge) = app.views.challenges.iter().find(|c| c.id == selected).cloned() else {
            ui.label("暂无挑战");
            return;
        };
        ui.separator();
        ui.heading(&challenge.title);
        ui.label(format!("难度 {}", challenge.difficulty));
        ui.label(&challenge.description);

        ui.add(
            egui::TextEdit::multiline(&mut app.tracker.state.gui.prompt_input)
                .hint_text("输入你的 prompt")
                .desired_rows(6)
                .desired_width(f32::INFINITY),
        );
        if ui.button("提交评测").clicked() {
            let r = app.api().prompt_challenge_evaluate(&challenge.id, &app.state().gui.prompt_input);
            app.views.evaluation = app.report("评测", r);
        }

        if let Some(ev) = &app.views.evaluation {
            let (text, color) = if ev.passed { ("通过", "#52c41a") } else { ("未通过", "#ff4d4f") };
            ui.label(RichText::new(format!("{text} · 得分 {}", ev.score)).color(color32(color)).strong());
            if !ev.feedback.is_empty() {
                ui.label(&ev.feedback);
            }
        }
    }
}

// src/gui/pages/practice.rs
use eframe::egui;

use super::Page;
use crate::api::PracticeData;
use crate::config::state::LoadModule;
use crate::gui::app::App;
use crate::gui::components::problem_grid::{self, chunk_kp, ProblemRow};
use crate::gui::components::{search_bar, tabs};
use crate::router::{ProblemsView, Tab};

pub struct PracticePage;
pub static PAGE: PracticePage = PracticePage;

pub const PROBLEMS_PER_ROW: usize = 10;

/// Rows of one catalogue category, knowledge point by knowledge point.
pub fn category_rows(data: &PracticeData, key: &str) -> Vec<ProblemRow> {
    data.get(key)
        .map(|cat| {
            cat.grouped()
                .iter()
                .flat_map(|kp| chunk_kp(&kp.category, &kp.problems, PROBLEMS_PER_ROW))
                .collect()
        })
        .unwrap_or_default()
}

impl Page for PracticePage {
    fn tab(&self) -> Tab { Tab::Problems }
    fn title(&self) -> &'static str { "专项练习" }
    fn view(&self) -> Option<ProblemsView> { Some(ProblemsView::Practice) }

    fn on_enter(&self, app: &mut App) {
        if app.state().practice_data_cache.is_none() {
            match app.load(LoadModule::Practice, |api| api.fetch_practice_data()) {
                Some(data) => app.state_mut().practice_data_cache = Some(data),
                None => app.status("加载练习数据失败"),
            }
        }
        let key = app.state().active_practice_sub_tab.clone();
        let rows = app
            .state()
            .practice_data_cache
            .as_ref()
            .map(|d| category_rows(d, &key))
            .unwrap_or_default();
        app.set_problem_rows(ProblemsView::Practice, rows);
    }

    fn draw(&self, ui: &mut egui::Ui, app: &mut App) {
        tabs::problems_views(ui, app);
        ui.separator();

        let keys: Vec<String> = app
            .state()
            .practice_data_cache
            .as_ref()
            .map(|d| d.keys().cloned().collect())
            .unwrap_or_default();
        let items: Vec<(&str, &str)> = keys.iter().map(|k| (k.as_str(), k.as_str())).collect();
        let active = app.state().active_practice_sub_tab.clone();
        if let Some(key) = tabs::sub_tabs(ui, &active, &items) {
            let key = s!(key);
            app.tracker.switch_practice_tab(&key);
        }

        search_bar::draw(ui, app);
        ui.separator();

        if app.state().is_loading(LoadModule::Practice) {
            ui.spinner();
        }
        problem_grid::draw(ui, app, ProblemsView::Practice, false);
    }
}

// src/gui/pages/interview.rs
//
// "campus" pages through the contest endpoint (types 100/101); every other
// sub-tab reads the static catalogue.

use eframe::egui;

use super::contest::contest_rows;
use super::practice::category_rows;
use super::Page;
use crate::config::consts::INTERVIEW_PAGE_SIZE;
use crate::config::state::LoadModule;
use crate::gui::app::App;
use crate::gui::components::{pager, problem_grid, search_bar, tabs};
use crate::router::{ProblemsView, Tab};

pub struct InterviewPage;
pub static PAGE: InterviewPage = InterviewPage;

const CAMPUS: &str = "campus";
const CAMPUS_TABS: [(&str, &str); 2] = [("100", "校招真题"), ("101", "校招真题 (2)")];

impl Page for InterviewPage {
    fn tab(&self) -> Tab { Tab::Problems }
    fn title(&self) -> &'static str { "面试" }
    fn view(&self) -> Option<ProblemsView> { Some(ProblemsView::Interview) }

    fn on_enter(&self, app: &mut App) {
        let sub = app.state().active_interview_sub_tab.clone();

        // catalogue keys feed the sub-tab strip, so it is loaded either way
        if app.state().interview_data_cache.is_none() {
            match app.load(LoadModule::Interview, |api| api.fetch_interview_data()) {
                Some(data) => app.state_mut().interview_data_cache = Some(data),
                None => app.status("加载面试数据失败"),
            }
        }

        let rows = if sub == CAMPUS {
            let campus = app.state().active_campus_sub_tab.clone();
            let page = app.state().interview_current_page;
            match app.load(LoadModule::Interview, |api| api.fetch_campus_data(&campus, page, INTERVIEW_PAGE_SIZE)) {
                Some(result) => {
                    let rows = contest_rows(&result.contests);
                    app.state_mut().interview_items = result.contests;
                    app.views.interview_total = result.total_count;
                    rows
                }
                None => {
                    app.status("加载校园招聘数据失败");
                    Vec::new()
                }
            }
        } else {
            app.state()
                .interview_data_cache
                .as_ref()
                .map(|d| category_rows(d, &sub))
                .unwrap_or_default()
        };
        app.set_problem_rows(ProblemsView::Interview, rows);
    }

    fn draw(&self, ui: &mut egui::Ui, app: &mut App) {
        tabs::problems_views(ui, app);
        ui.separator();

        let mut keys: Vec<String> = vec![s!(CAMPUS)];
        if let Some(d) = &app.state().interview_data_cache {
            keys.extend(d.keys().cloned());
        }
        let items: Vec<(&str, &str)> = keys
            .iter()
            .map(|k| (k.as_str(), if k == CAMPUS { "校园招聘" } else { k.as_str() }))
            .collect();
        let active = app.state().active_interview_sub_tab.clone();
        if let Some(key) = tabs::sub_tabs(ui, &active, &items) {
            let key = s!(key);
            app.tracker.switch_interview_tab(&key);
        }

        if active == CAMPUS {
            let campus = app.state().active_campus_sub_tab.clone();
            if let Some(key) = tabs::sub_tabs(ui, &campus, &CAMPUS_TABS) {
                app.tracker.switch_campus_sub_tab(key);
            }
        }

        search_bar::draw(ui, app);
        ui.separator();

        if app.state().is_loading(LoadModule::Interview) {
            ui.spinner();
        }
        problem_grid::draw(ui, app, ProblemsView::Interview, true);

        if active == CAMPUS {
            let mut page = app.state().interview_current_page;
            let total = app.views.interview_total;
            if pager::draw(ui, &mut page, total, INTERVIEW_PAGE_SIZE) {
                app.state_mut().interview_current_page = page;
                let campus = app.state().active_campus_sub_tab.clone();
                app.tracker.switch_campus_sub_tab(&campus);
            }
        }
    }
}

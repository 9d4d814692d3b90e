// src/gui/pages/contest.rs
use eframe::egui;

use super::Page;
use crate::api::Contest;
use crate::config::consts::{CONTESTS_PAGE_SIZE, CONTEST_TYPES};
use crate::config::state::{AppState, LoadModule};
use crate::gui::app::App;
use crate::gui::components::problem_grid::{self, ProblemCell, ProblemRow};
use crate::gui::components::{pager, search_bar, tabs};
use crate::router::{ProblemsView, Tab};

pub struct ContestPage;
pub static PAGE: ContestPage = ContestPage;

/// Cup series offered as a name filter ("" = every cup).
const CUPS: [(&str, &str); 3] = [("", "全部杯赛"), ("蓝桥杯", "蓝桥杯"), ("传智杯", "传智杯")];

pub fn contest_rows(contests: &[Contest]) -> Vec<ProblemRow> {
    contests
        .iter()
        .map(|c| ProblemRow {
            label: c.name.clone(),
            link: c.url.clone(),
            kp: None,
            cells: c.problems.iter().map(ProblemCell::from).collect(),
        })
        .collect()
}

fn visible_rows(state: &AppState) -> Vec<ProblemRow> {
    match state.active_beisai_category.as_deref() {
        Some(cup) => {
            let picked: Vec<Contest> = state.contests.iter().filter(|c| c.name.contains(cup)).cloned().collect();
            contest_rows(&picked)
        }
        None => contest_rows(&state.contests),
    }
}

impl Page for ContestPage {
    fn tab(&self) -> Tab { Tab::Problems }
    fn title(&self) -> &'static str { "比赛" }
    fn view(&self) -> Option<ProblemsView> { Some(ProblemsView::Contests) }

    fn on_enter(&self, app: &mut App) {
        let tab = app.state().active_contest_tab.clone();
        let page = app.state().contests_current_page;
        match app.load(LoadModule::Contests, |api| api.fetch_contests(&tab, page, CONTESTS_PAGE_SIZE)) {
            Some(result) => {
                let st = app.state_mut();
                st.contests = result.contests;
                st.total_contests = result.total_count;
            }
            None => {
                app.state_mut().reset_contest_state();
                app.status("加载比赛数据失败");
            }
        }
        let rows = visible_rows(app.state());
        app.set_problem_rows(ProblemsView::Contests, rows);
    }

    fn draw(&self, ui: &mut egui::Ui, app: &mut App) {
        tabs::problems_views(ui, app);
        ui.separator();

        let items: Vec<(&str, &str)> = CONTEST_TYPES.iter().map(|(k, label, _)| (*k, *label)).collect();
        let active = app.state().active_contest_tab.clone();
        if let Some(key) = tabs::sub_tabs(ui, &active, &items) {
            app.tracker.switch_contest_tab(key);
        }

        let cup = app.state().active_beisai_category.clone().unwrap_or_default();
        if let Some(key) = tabs::sub_tabs(ui, &cup, &CUPS) {
            app.state_mut().set_active_beisai_category(Some(key));
            let rows = visible_rows(app.state());
            app.set_problem_rows(ProblemsView::Contests, rows);
        }

        search_bar::draw(ui, app);
        ui.separator();

        if app.state().is_loading(LoadModule::Contests) {
            ui.spinner();
        }
        problem_grid::draw(ui, app, ProblemsView::Contests, true);

        let mut page = app.state().contests_current_page;
        if pager::draw(ui, &mut page, app.state().total_contests, CONTESTS_PAGE_SIZE) {
            app.state_mut().contests_current_page = page;
            // same tab: keeps the page, refetches and re-highlights
            app.tracker.switch_contest_tab(&active);
        }
    }
}

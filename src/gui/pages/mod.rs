// src/gui/pages/mod.rs
use eframe::egui;

use crate::gui::app::App;
use crate::router::{ProblemsView, Tab};

pub mod achievements;
pub mod activity;
pub mod admin;
pub mod battle;
pub mod contest;
pub mod daily;
pub mod dify;
pub mod info;
pub mod interview;
pub mod practice;
pub mod profile;
pub mod prompt;
pub mod rankings;
pub mod skill_tree;
pub mod team;

/// One view of the dashboard. Pages are stateless statics; whatever they
/// load lives in `App::views` and the shell state.
pub trait Page: Send + Sync + 'static {
    fn tab(&self) -> Tab;
    fn title(&self) -> &'static str;

    /// Sub-view of the problems tab, if this page is one.
    fn view(&self) -> Option<ProblemsView> {
        None
    }

    /// Called when the page becomes active (or its filter changes).
    /// Fetches run here, blocking, on the UI thread.
    fn on_enter(&self, _app: &mut App) {}

    fn draw(&self, ui: &mut egui::Ui, app: &mut App);
}

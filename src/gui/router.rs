// src/gui/router.rs
use super::pages::{self, Page};
use crate::router::{ProblemsView, Tab};

pub static PAGES: &[&'static dyn Page] = &[
    &pages::daily::PAGE,
    &pages::contest::PAGE,
    &pages::practice::PAGE,
    &pages::interview::PAGE,
    &pages::rankings::PAGE,
    &pages::skill_tree::PAGE,
    &pages::achievements::PAGE,
    &pages::team::PAGE,
    &pages::battle::PAGE,
    &pages::activity::PAGE,
    &pages::prompt::PAGE,
    &pages::profile::PAGE,
    &pages::info::FAQ,
    &pages::info::CHANGELOG,
    &pages::admin::PAGE,
    &pages::dify::PAGE,
];

pub fn all_pages() -> &'static [&'static dyn Page] {
    PAGES
}

/// Page rendering `tab`; the problems tab picks by sub-view.
pub fn page_for(tab: Tab, view: ProblemsView) -> &'static dyn Page {
    match tab {
        Tab::Problems => match view {
            ProblemsView::Contests  => &pages::contest::PAGE,
            ProblemsView::Practice  => &pages::practice::PAGE,
            ProblemsView::Interview => &pages::interview::PAGE,
        },
        _ => PAGES
            .iter()
            .copied()
            .find(|p| p.tab() == tab)
            .unwrap_or(&pages::daily::PAGE),
    }
}

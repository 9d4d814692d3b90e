// src/gui/crawl.rs
//
// Crawls started from the admin page. They run on a worker thread and only
// talk back through the shared status line.

use std::error::Error;
use std::path::Path;
use std::sync::atomic::Ordering;
use std::thread;

use crate::config::consts::{CLIST_OUT_FILE, CLIST_TABLE_FILE, WEEKLY_OUT_FILE};
use crate::config::options::ScrapeOptions;
use crate::gui::app::App;
use crate::gui::progress::GuiProgress;
use crate::scrape;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crawl {
    Weekly,
    Clist,
}

impl Crawl {
    pub fn label(self) -> &'static str {
        match self {
            Crawl::Weekly => "weekly",
            Crawl::Clist => "clist",
        }
    }

    fn run(self, opts: &ScrapeOptions, prog: &mut GuiProgress) -> Result<String, Box<dyn Error>> {
        match self {
            Crawl::Weekly => {
                let out = scrape::collect_weekly(opts, Some(prog))?;
                scrape::save_weekly(&out, Path::new(WEEKLY_OUT_FILE))?;
                Ok(format!("{} contest(s) → {}", out.contests.len(), WEEKLY_OUT_FILE))
            }
            Crawl::Clist => {
                let out = scrape::collect_clist(opts, Some(prog))?;
                scrape::save_clist(&out, Path::new(CLIST_OUT_FILE))?;
                let rows = scrape::generate_table(Path::new(CLIST_OUT_FILE), Path::new(CLIST_TABLE_FILE))?;
                Ok(format!("{} problem(s) → {}, {} table row(s)", out.items.len(), CLIST_OUT_FILE, rows))
            }
        }
    }
}

/// Start a crawl unless one is already running. Returns false when refused.
pub fn start(app: &App, which: Crawl) -> bool {
    if app.crawling.swap(true, Ordering::SeqCst) {
        app.status("A crawl is already running");
        return false;
    }
    let opts = app.state().options.scrape.clone();
    let status = app.status.clone();
    let flag = app.crawling.clone();
    app.status(format!("Crawl {} started", which.label()));
    logf!("Crawl: begin {}", which.label());

    thread::spawn(move || {
        let mut prog = GuiProgress::new(status.clone());
        let msg = match which.run(&opts, &mut prog) {
            Ok(summary) => {
                logf!("Crawl: {} OK, {}", which.label(), summary);
                summary
            }
            Err(e) => {
                loge!("Crawl: {} failed: {}", which.label(), e);
                format!("Crawl {} failed: {e}", which.label())
            }
        };
        if let Ok(mut s) = status.lock() {
            *s = msg;
        }
        flag.store(false, Ordering::SeqCst);
    });
    true
}

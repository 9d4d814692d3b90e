// src/scrape/weekly.rs
use std::error::Error;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use url::form_urlencoded::byte_serialize;

use crate::config::consts::{AC_BASE, WEEKLY_CONTEST_PAUSE_MS, WEEKLY_LIST_PAUSE_MS};
use crate::config::options::ScrapeOptions;
use crate::core::net::lenient_json;
use crate::core::Http;
use crate::progress::Progress;
use crate::specs::weekly::{
    self, contest_id_from_url, dedup_by_contest_id, ContestLink, WeeklyContest, WeeklyOutput, WeeklyProblem,
};

fn client(opts: &ScrapeOptions) -> Result<Http, Box<dyn Error>> {
    let http = Http::new()?;
    Ok(if opts.has_cookie() { http.with_cookie(&opts.cookie) } else { http })
}

/// Walk the contest list, then each round's problem page.
///
/// A failing list page counts as empty; a contest with no problems found is
/// left out of the output.
pub fn collect_weekly(
    opts: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<WeeklyOutput, Box<dyn Error>> {
    let http = client(opts)?;

    let mut links: Vec<ContestLink> = Vec::new();
    for page in 1..=opts.weekly_total_pages {
        let url = weekly::list_page_url(page);
        match http.get_text(&url) {
            Ok(doc) => {
                let found = weekly::parse_contest_list(&doc);
                logf!("Weekly: list page {} → {} round(s)", page, found.len());
                links.extend(found);
            }
            Err(e) => {
                loge!("Weekly: list page {} failed: {}", page, e);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&format!("list page {page}"));
                }
            }
        }
        if page < opts.weekly_total_pages {
            thread::sleep(Duration::from_millis(WEEKLY_LIST_PAUSE_MS));
        }
    }
    let links = dedup_by_contest_id(links);

    if let Some(p) = progress.as_deref_mut() {
        p.begin(links.len());
        p.log(&format!("Found {} weekly round(s)", links.len()));
    }

    let mut out = WeeklyOutput::default();
    for (i, link) in links.iter().enumerate() {
        let problems = contest_problems(&http, opts, link);
        if problems.is_empty() {
            logf!("Weekly: {} has no problems, skipped", link.title);
            if let Some(p) = progress.as_deref_mut() {
                p.item_failed(&link.title);
            }
        } else {
            if let Some(p) = progress.as_deref_mut() {
                p.item_done(&format!("{} ({} problems)", link.title, problems.len()));
            }
            out.contests.push(WeeklyContest {
                name: link.title.clone(),
                round: link.round,
                url: link.full_link.clone(),
                problems,
            });
        }
        if i + 1 < links.len() {
            thread::sleep(Duration::from_millis(WEEKLY_CONTEST_PAUSE_MS));
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(out)
}

/// API first when logged in, then the static page.
fn contest_problems(http: &Http, opts: &ScrapeOptions, link: &ContestLink) -> Vec<WeeklyProblem> {
    let contest_id = contest_id_from_url(&link.full_link).unwrap_or_default();

    if opts.has_cookie() && !contest_id.is_empty() {
        let token: String = byte_serialize(opts.token.as_bytes()).collect();
        let api = format!("{AC_BASE}/acm/contest/problem-list?token={token}&id={contest_id}");
        let referer = format!("{AC_BASE}/acm/contest/{contest_id}");
        let headers = [("Accept", "application/json, text/plain, */*"), ("Referer", referer.as_str())];
        match http.get_text_with(&api, &headers) {
            Ok(body) => {
                let problems = weekly::parse_api_problems(&lenient_json(&body));
                if !problems.is_empty() {
                    logd!("Weekly: {} via API → {}", contest_id, problems.len());
                    return problems;
                }
            }
            Err(e) => loge!("Weekly: API for {} failed: {}", contest_id, e),
        }
    }

    match http.get_text(&link.full_link) {
        Ok(doc) => weekly::parse_contest_problems(&doc, &contest_id),
        Err(e) => {
            loge!("Weekly: {} failed: {}", link.full_link, e);
            Vec::new()
        }
    }
}

pub fn save_weekly(out: &WeeklyOutput, path: &Path) -> Result<(), Box<dyn Error>> {
    fs::write(path, serde_json::to_string_pretty(out)?)?;
    logf!("Weekly: saved {} contest(s) to {}", out.contests.len(), path.display());
    Ok(())
}

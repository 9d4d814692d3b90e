// src/specs/clist.rs
//
// clist.by problem table, Nowcoder resource only.

use std::collections::HashSet;
use std::io;
use std::sync::OnceLock;

use chrono::{SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::consts::{CLIST_RESOURCE, CLIST_URL};
use crate::core::csv::write_row;
use crate::core::html::{anchors, blocks, inner_after_open_tag, strip_tags};
use crate::core::sanitize::first_rating_like_number;

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ClistItem {
    pub date: String,
    pub rating: Option<u32>,
    pub problem_name: String,
    pub problem_url: String,
    pub letter: Option<String>,
    pub contest_name: Option<String>,
    pub contest_url: Option<String>,
    pub contest_standings_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ClistMeta {
    pub source: String,
    pub resource: u32,
    pub generated_at: String,
    pub pages: u32,
}

/// Shape of `clist_nowcoder_problems.json`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ClistOutput {
    pub meta: ClistMeta,
    pub items: Vec<ClistItem>,
}

impl ClistOutput {
    pub fn new(items: Vec<ClistItem>, pages: u32) -> Self {
        Self {
            meta: ClistMeta {
                source: s!(CLIST_URL),
                resource: CLIST_RESOURCE,
                generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                pages,
            },
            items,
        }
    }
}

fn problem_path_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"contest/(\d+)/(\w+)").expect("valid regex pattern"))
}

/// Listing URL for a 1-based page.
pub fn page_url(page: u32) -> String {
    if page <= 1 {
        s!(CLIST_URL)
    } else {
        format!("{CLIST_URL}&problems_paging={page}")
    }
}

/// Rows of every `<tbody>`. Columns: date, rating, then free-form cells holding
/// the problem and standings links. Rows without a Nowcoder problem link are skipped.
pub fn parse_problems(doc: &str) -> Vec<ClistItem> {
    let mut out = Vec::new();
    for tbody in blocks(doc, "tbody") {
        for tr in blocks(tbody, "tr") {
            if let Some(item) = parse_row(tr) {
                out.push(item);
            }
        }
    }
    out
}

fn parse_row(tr: &str) -> Option<ClistItem> {
    let cells: Vec<String> = blocks(tr, "td")
        .into_iter()
        .map(|td| strip_tags(inner_after_open_tag(td)))
        .collect();
    let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();

    let links = anchors(tr);
    let problem = links
        .iter()
        .find(|a| a.href.contains("ac.nowcoder.com/acm/contest/"))?;
    let contest = links.iter().find(|a| a.href.contains("/standings/"));

    let rating = leading_int(&cell(1)).or_else(|| first_rating_like_number(&strip_tags(tr)));

    let (letter, contest_url) = match problem_path_re().captures(&problem.href) {
        Some(c) => (Some(s!(&c[2])), Some(format!("https://ac.nowcoder.com/acm/contest/{}", &c[1]))),
        None => (None, None),
    };

    Some(ClistItem {
        date: cell(0),
        rating,
        problem_name: problem.text.clone(),
        problem_url: problem.href.clone(),
        letter,
        contest_name: contest.map(|a| a.text.clone()).filter(|t| !t.is_empty()),
        contest_url,
        contest_standings_url: contest.map(|a| a.href.clone()),
    })
}

/// Leading decimal digits of a cell (`"1800 ★"` → 1800).
fn leading_int(s: &str) -> Option<u32> {
    let t = s.trim();
    let end = t.find(|c: char| !c.is_ascii_digit()).unwrap_or(t.len());
    t[..end].parse().ok()
}

/// Drop repeats across pages. Keyed by problem URL, else `contest|letter|name`; first wins.
pub fn dedup_items(items: Vec<ClistItem>) -> Vec<ClistItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|it| {
            let key = if it.problem_url.is_empty() {
                join!(
                    it.contest_url.as_deref().unwrap_or_default(), "|",
                    it.letter.as_deref().unwrap_or_default(), "|",
                    &it.problem_name
                )
            } else {
                it.problem_url.clone()
            };
            seen.insert(key)
        })
        .collect()
}

/// Two-column Markdown summary (name, link).
pub fn markdown_table(items: &[ClistItem]) -> String {
    let mut md = s!("# 题目链接汇总\n\n| 题目名称 | 题目链接 |\n| :--- | :--- |\n");
    for it in items {
        let name = if it.problem_name.is_empty() { "N/A" } else { it.problem_name.as_str() };
        let url = if it.problem_url.is_empty() { "#" } else { it.problem_url.as_str() };
        md.push_str(&format!("| {name} | [{url}]({url}) |\n"));
    }
    md
}

/// Items whose contest name mentions any of `keywords`, in crawl order.
pub fn filter_by_contest<'a>(items: &'a [ClistItem], keywords: &[&str]) -> Vec<&'a ClistItem> {
    items
        .iter()
        .filter(|it| {
            let contest = it.contest_name.as_deref().unwrap_or_default();
            keywords.iter().any(|k| contest.contains(k))
        })
        .collect()
}

/// Spreadsheet export (name, link, contest) as UTF-8 CSV. The leading BOM
/// makes Excel read the Chinese headers correctly.
pub fn sheet_csv(items: &[&ClistItem]) -> io::Result<Vec<u8>> {
    let mut out = "\u{FEFF}".as_bytes().to_vec();
    write_row(&mut out, &["题目名称", "题目链接", "所属比赛"])?;
    for it in items {
        let contest = it.contest_name.as_deref().unwrap_or_default();
        write_row(&mut out, &[it.problem_name.as_str(), it.problem_url.as_str(), contest])?;
    }
    Ok(out)
}

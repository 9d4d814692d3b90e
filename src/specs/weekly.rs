// src/specs/weekly.rs
//
// Weekly round ("牛客周赛 Round N") list and problem pages.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::consts::{AC_BASE, WEEKLY_LIST_URL};
use crate::core::html::{
    self, absolutize, anchors, attr, blocks, by_class, has_class, inner_after_open_tag, opener, strip_tags,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContestLink {
    pub title: String,
    pub round: u32,
    pub link: String,
    pub full_link: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct WeeklyProblem {
    pub letter: String,
    pub title: String,
    pub difficulty: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct WeeklyContest {
    pub name: String,
    pub round: u32,
    pub url: String,
    pub problems: Vec<WeeklyProblem>,
}

/// Shape of `nowcoder_weekly_contests.json`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct WeeklyOutput {
    pub contests: Vec<WeeklyContest>,
}

fn round_title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)牛客周赛\s*Round\s*(\d+)").expect("valid regex pattern"))
}

fn problem_href_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/acm/contest/\d+/([A-Z])\b").expect("valid regex pattern"))
}

fn letter_title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Z])\.\s*(.+)$").expect("valid regex pattern"))
}

fn contest_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"contest/(\d+)").expect("valid regex pattern"))
}

pub fn contest_id_from_url(url: &str) -> Option<String> {
    contest_id_re().captures(url).map(|c| s!(&c[1]))
}

pub fn is_weekly_title(title: &str) -> bool {
    round_title_re().is_match(title)
}

/// Difficulty guess from title keywords: 600 easy, 1800 hard, 1200 otherwise.
pub fn estimate_difficulty(title: &str) -> u32 {
    const EASY: [&str; 5] = ["入门", "基础", "简单", "Easy", "Basic"];
    const HARD: [&str; 7] = ["困难", "复杂", "Hard", "Advanced", "DP", "图论", "数学"];
    if EASY.iter().any(|k| title.contains(k)) {
        600
    } else if HARD.iter().any(|k| title.contains(k)) {
        1800
    } else {
        1200
    }
}

/* ---------- contest list ---------- */

/// Weekly rounds on one list page, deduplicated by contest id (first wins).
///
/// Titles come from `<h4>`; the link is an anchor inside the heading, else the
/// first contest anchor after it. "回顾比赛" buttons are matched to the
/// nearest preceding heading as a second pass.
pub fn parse_contest_list(doc: &str) -> Vec<ContestLink> {
    let lc = html::to_lower(doc);

    let mut headings: Vec<(usize, usize, String)> = Vec::new();
    let mut pos = 0usize;
    while let Some((s, e)) = html::next_block(doc, &lc, "h4", pos) {
        headings.push((s, e, strip_tags(inner_after_open_tag(&doc[s..e]))));
        pos = e;
    }

    let mut found: Vec<ContestLink> = Vec::new();

    for (i, (s, e, title)) in headings.iter().enumerate() {
        if !is_weekly_title(title) {
            continue;
        }
        let inside = anchors(&doc[*s..*e]).into_iter().find(|a| a.href.contains("/acm/contest/"));
        let href = match inside {
            Some(a) => Some(a.href),
            None => {
                let stop = headings.get(i + 1).map(|h| h.0).unwrap_or(doc.len());
                anchors(&doc[*e..stop])
                    .into_iter()
                    .find(|a| a.href.contains("/acm/contest/"))
                    .map(|a| a.href)
            }
        };
        if let Some(href) = href {
            found.push(make_link(title, &href));
        }
    }

    // "回顾比赛" buttons
    let mut at = 0usize;
    while let Some((s, e)) = html::next_block(doc, &lc, "a", at) {
        at = e;
        let block = &doc[s..e];
        if !strip_tags(inner_after_open_tag(block)).contains("回顾比赛") {
            continue;
        }
        let Some(href) = attr(opener(block), "href").filter(|h| h.contains("/acm/contest/")) else { continue };
        let title = headings.iter().rev().find(|h| h.1 <= s).map(|h| h.2.clone());
        if let Some(title) = title.filter(|t| is_weekly_title(t)) {
            found.push(make_link(&title, &href));
        }
    }

    dedup_by_contest_id(found)
}

fn make_link(title: &str, href: &str) -> ContestLink {
    let round = round_title_re()
        .captures(title)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0);
    ContestLink {
        title: s!(title.trim()),
        round,
        link: s!(href),
        full_link: absolutize(AC_BASE, href),
    }
}

pub fn dedup_by_contest_id(list: Vec<ContestLink>) -> Vec<ContestLink> {
    let mut seen = HashSet::new();
    list.into_iter()
        .filter(|c| {
            let key = contest_id_from_url(&c.full_link).unwrap_or_else(|| c.full_link.clone());
            seen.insert(key)
        })
        .collect()
}

/* ---------- problems ---------- */

/// Problems of one contest page, A..Z, deduplicated by `letter|title`.
///
/// Precedence: green links in left-aligned cells, any `/acm/contest/<id>/<L>`
/// anchor and `.problem-item` cards; then two-column `letter | title` rows;
/// then `X. Title` text.
pub fn parse_contest_problems(doc: &str, contest_id: &str) -> Vec<WeeklyProblem> {
    let mut problems = Vec::new();

    for td in blocks(doc, "td") {
        let style = attr(opener(td), "style").unwrap_or_default().to_ascii_lowercase();
        if !style.contains("text-align: left") {
            continue;
        }
        for a in anchors(td) {
            if has_class(&a.open_tag, "link-green") {
                push_anchor_problem(&mut problems, &a.href, &a.text);
            }
        }
    }
    for a in anchors(doc) {
        push_anchor_problem(&mut problems, &a.href, &a.text);
    }
    problems.extend(item_problems(doc, contest_id));

    if problems.is_empty() {
        problems = table_row_problems(doc, contest_id);
    }
    if problems.is_empty() {
        problems = text_problems(doc, contest_id);
    }

    finish(problems)
}

fn push_anchor_problem(out: &mut Vec<WeeklyProblem>, href: &str, text: &str) {
    if !href.contains("/acm/contest/") || text.is_empty() {
        return;
    }
    if let Some(c) = problem_href_re().captures(href) {
        out.push(WeeklyProblem {
            letter: s!(&c[1]),
            title: s!(text),
            difficulty: estimate_difficulty(text),
            url: absolutize(AC_BASE, href),
        });
    }
}

fn problem_url(contest_id: &str, letter: &str) -> String {
    if contest_id.is_empty() {
        s!()
    } else {
        format!("{AC_BASE}/acm/contest/{contest_id}/{letter}")
    }
}

fn item_problems(doc: &str, contest_id: &str) -> Vec<WeeklyProblem> {
    let mut out = Vec::new();
    for item in by_class(doc, &["problem-item", "contest-problem-item"]) {
        let text_of = |classes: &[&str]| {
            by_class(item, classes)
                .first()
                .map(|b| strip_tags(inner_after_open_tag(b)))
                .unwrap_or_default()
        };
        let letter = text_of(&["problem-index", "index"]);
        let title = text_of(&["problem-title", "title"]);
        if letter.is_empty() || title.is_empty() {
            continue;
        }
        let url = match anchors(item).into_iter().map(|a| a.href).find(|h| !h.is_empty()) {
            Some(href) => absolutize(AC_BASE, &href),
            None => problem_url(contest_id, &letter),
        };
        out.push(WeeklyProblem { difficulty: estimate_difficulty(&title), letter, title, url });
    }
    out
}

fn table_row_problems(doc: &str, contest_id: &str) -> Vec<WeeklyProblem> {
    let mut out = Vec::new();
    for tr in blocks(doc, "tr") {
        let cells = blocks(tr, "td");
        if cells.len() < 2 {
            continue;
        }
        let letter = strip_tags(inner_after_open_tag(cells[0]));
        let anchor = anchors(cells[1]).into_iter().next();
        let title = match &anchor {
            Some(a) if !a.text.is_empty() => a.text.clone(),
            _ => strip_tags(inner_after_open_tag(cells[1])),
        };
        let is_letter = letter.len() == 1 && letter.chars().all(|c| c.is_ascii_uppercase());
        if !is_letter || title.is_empty() {
            continue;
        }
        let url = match anchor.map(|a| a.href).filter(|h| !h.is_empty()) {
            Some(href) => absolutize(AC_BASE, &href),
            None => problem_url(contest_id, &letter),
        };
        out.push(WeeklyProblem { difficulty: estimate_difficulty(&title), letter, title, url });
    }
    out
}

fn text_problems(doc: &str, contest_id: &str) -> Vec<WeeklyProblem> {
    let mut out = Vec::new();
    for tag in ["a", "span", "div", "li"] {
        for b in blocks(doc, tag) {
            let text = strip_tags(inner_after_open_tag(b));
            if let Some(c) = letter_title_re().captures(&text) {
                let letter = s!(&c[1]);
                let title = s!(c[2].trim());
                out.push(WeeklyProblem {
                    difficulty: estimate_difficulty(&title),
                    url: problem_url(contest_id, &letter),
                    letter,
                    title,
                });
            }
        }
    }
    out
}

fn finish(problems: Vec<WeeklyProblem>) -> Vec<WeeklyProblem> {
    let mut seen = HashSet::new();
    let mut out: Vec<WeeklyProblem> = problems
        .into_iter()
        .filter(|p| seen.insert(join!(&p.letter, "|", &p.title)))
        .collect();
    out.sort_by(|a, b| a.letter.cmp(&b.letter));
    out
}

/// `acm/contest/problem-list` reply (logged-in API): `{code: 0, data: {data: [{index, title}]}}`.
pub fn parse_api_problems(body: &Value) -> Vec<WeeklyProblem> {
    if body.get("code").and_then(Value::as_i64) != Some(0) {
        return Vec::new();
    }
    let Some(items) = body.pointer("/data/data").and_then(Value::as_array) else {
        return Vec::new();
    };
    let mut out: Vec<WeeklyProblem> = items
        .iter()
        .filter_map(|it| {
            let letter = it.get("index").and_then(Value::as_str)?;
            let title = it.get("title").and_then(Value::as_str)?;
            Some(WeeklyProblem {
                letter: s!(letter),
                title: s!(title),
                difficulty: estimate_difficulty(title),
                url: s!(),
            })
        })
        .collect();
    out.sort_by(|a, b| a.letter.cmp(&b.letter));
    out
}

/// One page of the finished-contest list (weekly category).
pub fn list_page_url(page: u32) -> String {
    format!("{WEEKLY_LIST_URL}&page={page}")
}

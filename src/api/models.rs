// src/api/models.rs
//
// Transient view models decoded from tracker JSON. Ids arrive as strings or
// numbers depending on the endpoint, so they are normalized to `String`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::consts::DIFFICULTY_SCORES;

/// `{code, msg, data}` wrapper around every tracker response.
#[derive(Clone, Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// `data` when `code` is one of `ok`, otherwise the server message as an error.
    pub fn into_data(self, ok: &[i64], what: &str) -> Result<T, Box<dyn std::error::Error>> {
        if !ok.contains(&self.code) {
            let msg = self.msg.filter(|m| !m.is_empty()).unwrap_or_else(|| format!("{what} failed"));
            return Err(format!("API error {}: {}", self.code, msg).into());
        }
        self.data.ok_or_else(|| format!("{what}: empty data").into())
    }

    pub fn is_ok(&self, ok: &[i64]) -> bool { ok.contains(&self.code) }
}

/* ---------- lenient field decoders ---------- */

/// String or number (or null) → `String`.
pub mod str_or_num {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => s,
            Value::Null => String::new(),
            Value::Number(n) => n.to_string(),
            other => other.to_string(),
        })
    }
}

pub fn lenient_u64<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)).unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

pub fn lenient_i64<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_i64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_i64().unwrap_or(0) != 0,
        Value::String(s) => matches!(s.as_str(), "true" | "1"),
        _ => false,
    })
}

/// `"1,2"`, `[1, 2]` or null → `["1", "2"]`.
fn id_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items
            .into_iter()
            .map(|v| match v {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(|p| s!(p))
            .collect(),
        Value::Number(n) => vec![n.to_string()],
        _ => Vec::new(),
    })
}

/* ---------- users / rankings ---------- */

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankEntry {
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub head_url: String,
    /// Solved count, or check-in days on the check-in board.
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count: u64,
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub place: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub continue_days: u64,
}

impl RankEntry {
    /// `0` and anything containing `w` mean "outside the top 10k".
    pub fn is_unranked(&self) -> bool {
        let p = self.place.trim();
        p.is_empty() || p == "0" || p.contains('w')
    }

    pub fn rank_label(&self) -> String {
        if self.is_unranked() { s!("1w+") } else { s!(self.place.trim()) }
    }

    /// Numeric rank for comparisons; unranked sorts as 10001.
    pub fn rank_value(&self) -> u64 {
        if self.is_unranked() {
            return 10_001;
        }
        self.place.trim().parse().unwrap_or(10_001)
    }

    pub fn avatar_url(&self, ui_base: &str) -> String {
        if self.head_url.is_empty() {
            s!()
        } else if self.head_url.starts_with("http") {
            s!(&self.head_url)
        } else {
            join!(ui_base, &self.head_url)
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankPage {
    #[serde(default)]
    pub ranks: Vec<RankEntry>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_count: u64,
}

impl RankPage {
    pub fn find(&self, uid: &str) -> Option<&RankEntry> {
        self.ranks.iter().find(|r| r.uid == uid)
    }
}

/// Result of a user search: the primary user and an optional rival.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchedUsers {
    pub user1: RankEntry,
    pub user2: Option<RankEntry>,
}

/* ---------- contests / problems ---------- */

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub problem_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub question_url: String,
    /// Raw value from the server: a 1..=10 level or an already-scored difficulty.
    #[serde(default, deserialize_with = "lenient_u64")]
    pub difficulty: u64,
}

impl Problem {
    pub fn link(&self) -> &str {
        if self.url.is_empty() { &self.question_url } else { &self.url }
    }

    /// Levels 1..=10 go through the score table; values above 10 are scores already.
    pub fn difficulty_score(&self) -> Option<u32> {
        difficulty_score(self.difficulty)
    }
}

pub fn difficulty_score(raw: u64) -> Option<u32> {
    match raw {
        0 => None,
        1..=10 => DIFFICULTY_SCORES
            .iter()
            .find(|(lvl, _)| u64::from(*lvl) == raw)
            .map(|(_, score)| *score),
        n => u32::try_from(n).ok(),
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    #[serde(default, alias = "contestId", deserialize_with = "str_or_num::deserialize")]
    pub id: String,
    #[serde(default, alias = "contestName")]
    pub name: String,
    #[serde(default, alias = "contestUrl")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub has_paywall: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub need_pay: bool,
    #[serde(default, alias = "questions")]
    pub problems: Vec<Problem>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContestPage {
    pub contests: Vec<Contest>,
    pub total_count: u64,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawContestPage {
    #[serde(default)]
    pub papers: Vec<Contest>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_count: u64,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    #[serde(default, deserialize_with = "id_list")]
    pub ac1_qids: Vec<String>,
    #[serde(default, deserialize_with = "id_list")]
    pub ac2_qids: Vec<String>,
}

/* ---------- static practice / interview JSON ---------- */

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct KnowledgePoint {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub problems: Vec<Problem>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct PracticeCategory {
    #[serde(default)]
    pub knowledge_points: Vec<KnowledgePoint>,
    #[serde(default)]
    pub problems: Vec<Problem>,
}

impl PracticeCategory {
    /// Problems grouped by knowledge point; a flat list becomes one group.
    /// Entries without a problem id are dropped.
    pub fn grouped(&self) -> Vec<KnowledgePoint> {
        let source: Vec<KnowledgePoint> = if self.knowledge_points.is_empty() {
            vec![KnowledgePoint { category: s!("题目列表"), problems: self.problems.clone() }]
        } else {
            self.knowledge_points.clone()
        };
        source
            .into_iter()
            .map(|kp| KnowledgePoint {
                category: kp.category,
                problems: kp.problems.into_iter().filter(|p| !p.problem_id.is_empty()).collect(),
            })
            .filter(|kp| !kp.problems.is_empty())
            .collect()
    }
}

/// Whole static file: sub-tab key → category.
pub type PracticeData = BTreeMap<String, PracticeCategory>;

/* ---------- daily ---------- */

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TodayInfo {
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub question_id: String,
    #[serde(default)]
    pub question_title: String,
    #[serde(default)]
    pub question_url: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub checked_today: bool,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub continue_day: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count_day: u64,
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub uid: String,
    #[serde(default)]
    pub user: Option<Value>,
}

impl TodayInfo {
    /// Logged-in uid, if the server saw a session (`0` means anonymous).
    pub fn logged_in_uid(&self) -> Option<String> {
        let uid = self.uid.trim();
        (!uid.is_empty() && uid != "0").then(|| s!(uid))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CheckInStats {
    pub consecutive_days: u64,
    pub total_days: u64,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthProblem {
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub question_id: String,
    #[serde(default)]
    pub question_title: String,
    #[serde(default)]
    pub question_url: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DayLink {
    pub src: String,
    pub raw: String,
}

/* ---------- skill tree ---------- */

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TagProblem {
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub qid: String,
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub problem_id: String,
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub score: u64,
    #[serde(default, alias = "yilai", deserialize_with = "id_list")]
    pub dependencies: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TagInfo {
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub tag_id: String,
    #[serde(default)]
    pub tag_name: String,
    #[serde(default)]
    pub tag_desc: String,
    #[serde(default)]
    pub tag_tutorials: Option<Value>,
    #[serde(default)]
    pub problems: Vec<TagProblem>,
}

/// Newer `{tag, questions}` shape of `skill-tree/tagInfo`.
#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct TagInfoV2 {
    pub tag: TagInfo,
    #[serde(default)]
    pub questions: Vec<TagQuestionV2>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TagQuestionV2 {
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub question_id: String,
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub problem_id: String,
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub score: u64,
    #[serde(default, deserialize_with = "id_list")]
    pub dependencies: Vec<String>,
}

impl From<TagInfoV2> for TagInfo {
    fn from(v: TagInfoV2) -> Self {
        let problems = v
            .questions
            .into_iter()
            .map(|q| TagProblem {
                qid: q.question_id,
                problem_id: q.problem_id,
                uuid: q.uuid,
                name: if q.title.is_empty() { q.name } else { q.title },
                score: q.score,
                dependencies: q.dependencies,
            })
            .collect();
        TagInfo {
            tag_tutorials: v.tag.tag_tutorials.or_else(|| Some(Value::String(s!("[]")))),
            problems,
            ..v.tag
        }
    }
}

/// Per-tag completion, keyed by tag id.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkillProgress {
    #[serde(default)]
    pub node_progress: BTreeMap<String, f64>,
}

/* ---------- badges ---------- */

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub color_url: String,
    #[serde(default)]
    pub gray_url: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub r#type: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub score: u64,
    /// Threshold that earns the badge (days, solves, ...).
    #[serde(default, deserialize_with = "lenient_u64")]
    pub acquirement: u64,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub acquired: bool,
    /// 1 once the user has earned the badge.
    #[serde(default, deserialize_with = "lenient_u64")]
    pub status: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub create_time: u64,
    /// `MM-DD hh:mm` of `create_time`, filled client-side.
    #[serde(default)]
    pub time: String,
}

impl Badge {
    pub fn is_earned(&self) -> bool { self.status == 1 || self.acquired }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BadgeUserInfo {
    pub total_points: u64,
    pub recent: Vec<Badge>,
}

/* ---------- teams ---------- */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TeamRole {
    #[default]
    Member,
    Admin,
    Owner,
}

impl TeamRole {
    pub fn from_code(code: u64) -> Self {
        match code {
            2 => TeamRole::Owner,
            1 => TeamRole::Admin,
            _ => TeamRole::Member,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TeamRole::Owner  => "owner",
            TeamRole::Admin  => "admin",
            TeamRole::Member => "member",
        }
    }

    pub fn can_manage(self) -> bool { self != TeamRole::Member }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub team_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub person_count: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub person_limit: u64,
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub owner_user_id: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub my_role: u64,
}

impl Team {
    pub fn role(&self) -> TeamRole { TeamRole::from_code(self.my_role) }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub head_url: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub role: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub accept_count: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub submission_count: u64,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub checked_today: bool,
}

impl TeamMember {
    pub fn role(&self) -> TeamRole { TeamRole::from_code(self.role) }
}

/// Join request or invite; both are "apply" records server-side.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamApplication {
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub id: String,
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub team_id: String,
    #[serde(default)]
    pub team_name: String,
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub apply_uid: String,
    #[serde(default)]
    pub apply_user_name: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub status: u64,
    #[serde(default)]
    pub status_text: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub team_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub member_count: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub person_limit: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total_accept_count: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub today_accept_count: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub seven_days_accept_count: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub today_clock_count: u64,
}

/// Member row of a team leaderboard (solves or check-ins).
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemberRankRow {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub rank: u64,
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub accept_count: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub continue_days: u64,
}

impl MemberRankRow {
    /// Solves on the accept board, days on the check-in board.
    pub fn value(&self) -> u64 { self.accept_count.max(self.count) }
}

/// Team row of the cross-team activity board.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamRankRow {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub rank: u64,
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub team_id: String,
    #[serde(default)]
    pub team_name: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub member_count: u64,
    #[serde(default)]
    pub score: f64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub clock_total_times: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub ge30_count: u64,
}

/// `{total, list}` page used by the team endpoints.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Listed<T> {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total: u64,
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
}

impl<T> Default for Listed<T> {
    fn default() -> Self { Self { total: 0, list: Vec::new() } }
}

/// Payloads that come as a bare array or as `{total, list}`.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListOrWrapped<T> {
    List(Vec<T>),
    Wrapped(Listed<T>),
}

impl<T> ListOrWrapped<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListOrWrapped::List(v) => v,
            ListOrWrapped::Wrapped(l) => l.list,
        }
    }
}

/* ---------- battle ---------- */

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BattleMatch {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub matched: bool,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub opponent_id: Option<Value>,
}

/* ---------- admin ---------- */

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClockQuestion {
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub question_id: String,
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub problem_id: String,
    #[serde(default)]
    pub share_link: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BattleProblem {
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub id: String,
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub problem_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub level_score: u64,
}

/* ---------- prompt challenges ---------- */

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromptChallenge {
    #[serde(default, deserialize_with = "str_or_num::deserialize")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "desc")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub difficulty: u64,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromptEvaluation {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub score: u64,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub passed: bool,
    #[serde(default, alias = "comment")]
    pub feedback: String,
}

// src/api/mod.rs
//
// Tracker backend client. One method per endpoint, grouped by area in the
// submodules (each adds an `impl ApiService` block). Envelope handling and URL
// building live here.

use std::error::Error;

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::{consts::TRACKER_PREFIX, options::ApiOptions};
use crate::core::{net::form_body, Http};

pub mod models;

mod admin;
mod badge;
mod battle;
mod clock;
mod contests;
mod practice;
mod prompt;
mod rankings;
mod skill_tree;
mod team;

pub use admin::BattleProblemQuery;
pub use badge::{format_badge_time, parse_badge_user_info};
pub use battle::DEFAULT_BATTLE_MODE;
pub use contests::{contest_type_code, diff_body};
pub use models::*;
pub use rankings::RankType;
pub use skill_tree::tag_info_from_body;
pub use team::TeamBoard;

/// `code` values counting as success on most endpoints.
pub const OK: &[i64] = &[0];
/// Skill-tree and badge endpoints answer 200 on success too.
pub const OK_OR_200: &[i64] = &[0, 200];

/// What the app shell needs from the backend. `ApiService` is the real thing;
/// tests swap in a canned implementation.
pub trait TrackerApi {
    /// Raw `clock/todayinfo` envelope; `code` and `uid` tell whether anyone is logged in.
    fn today_info(&self) -> Result<Envelope<TodayInfo>, Box<dyn Error>>;

    /// Tracker admin capability of the session user.
    fn check_admin(&self) -> Result<bool, Box<dyn Error>>;

    /// Assistant (Dify) admin capability of the session user.
    fn check_assistant_admin(&self) -> Result<bool, Box<dyn Error>>;

    /// Rank record of one user; `None` when unknown or on failure.
    fn user_rank(&self, uid: &str) -> Option<RankEntry>;

    fn problem_diff(&self, uid1: &str, qids: &[String], uid2: Option<&str>)
        -> Result<DiffResult, Box<dyn Error>>;

    fn team_summary(&self, team_id: &str) -> Result<TeamSummary, Box<dyn Error>>;

    /// Join request with an optional message.
    fn team_apply(&self, team_id: &str, message: &str) -> Result<(), Box<dyn Error>>;

    /// Badge catalogue with the session user's earned flags; empty on failure.
    fn badge_list(&self, types: &[u32]) -> Vec<Badge>;
}

pub struct ApiService {
    http: Http,
    api_base: String,
}

impl ApiService {
    pub fn new(opts: &ApiOptions) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            http: Http::new()?,
            api_base: s!(opts.api_base.trim_end_matches('/')),
        })
    }

    pub fn api_base(&self) -> &str { &self.api_base }

    pub(crate) fn http(&self) -> &Http { &self.http }

    pub(crate) fn url(&self, path: &str, params: &[(&str, String)]) -> Result<Url, Box<dyn Error>> {
        endpoint_url(&self.api_base, path, params)
    }

    /// GET + envelope decode, `data` returned only for an accepted `code`.
    pub(crate) fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        ok: &[i64],
    ) -> Result<T, Box<dyn Error>> {
        let url = self.url(path, params)?;
        let env: Envelope<T> = self.http.get_json(url.as_str())?;
        env.into_data(ok, path)
    }

    /// POST with parameters in the query string and no body.
    /// Fails when the reply carries a non-zero `code`.
    pub(crate) fn post_query(&self, path: &str, params: &[(&str, String)]) -> Result<Value, Box<dyn Error>> {
        let url = self.url(path, params)?;
        let body = self.http.post_empty(url.as_str())?;
        check_code(&body, path)?;
        Ok(body.get("data").cloned().unwrap_or(Value::Null))
    }

    /// POST with an urlencoded form body.
    pub(crate) fn post_form_data<T: DeserializeOwned>(
        &self,
        path: &str,
        pairs: &[(&str, &str)],
    ) -> Result<T, Box<dyn Error>> {
        let url = self.url(path, &[])?;
        let env: Envelope<T> = self.http.post_form(url.as_str(), form_body(pairs, &[]))?;
        env.into_data(OK, path)
    }
}

/// `{api_base}/problem/tracker/{path}?{params}`. A `path` starting with `/`
/// is taken from the site root instead (e.g. `/dify/admin/check`).
pub fn endpoint_url(api_base: &str, path: &str, params: &[(&str, String)]) -> Result<Url, Box<dyn Error>> {
    let base = api_base.trim_end_matches('/');
    let full = if path.starts_with('/') {
        join!(base, path)
    } else {
        join!(base, TRACKER_PREFIX, path)
    };
    let url = if params.is_empty() {
        Url::parse(&full)?
    } else {
        Url::parse_with_params(&full, params.iter().map(|(k, v)| (*k, v.as_str())))?
    };
    Ok(url)
}

/// `code` present and not 0 → error with the server's message.
pub(crate) fn check_code(body: &Value, what: &str) -> Result<(), Box<dyn Error>> {
    match body.get("code").and_then(Value::as_i64) {
        Some(0) | None => Ok(()),
        Some(code) => {
            let msg = body.get("msg").and_then(Value::as_str).unwrap_or("server error");
            Err(format!("{what}: {msg} (code {code})").into())
        }
    }
}

/// Capability flags come back as `true`, `{isAdmin: true}`, `{admin: 1}`...
pub(crate) fn truthy_flag(data: &Value) -> bool {
    match data {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64().unwrap_or(0) != 0,
        Value::Object(map) => ["isAdmin", "admin", "result", "ok"]
            .iter()
            .filter_map(|k| map.get(*k))
            .any(truthy_flag),
        _ => false,
    }
}

impl TrackerApi for ApiService {
    fn today_info(&self) -> Result<Envelope<TodayInfo>, Box<dyn Error>> {
        self.fetch_daily_today_info()
    }

    fn check_admin(&self) -> Result<bool, Box<dyn Error>> {
        ApiService::check_admin(self)
    }

    fn check_assistant_admin(&self) -> Result<bool, Box<dyn Error>> {
        ApiService::check_assistant_admin(self)
    }

    fn user_rank(&self, uid: &str) -> Option<RankEntry> {
        self.fetch_user_data(uid)
    }

    fn problem_diff(&self, uid1: &str, qids: &[String], uid2: Option<&str>)
        -> Result<DiffResult, Box<dyn Error>>
    {
        self.fetch_user_problem_diff(uid1, qids, uid2)
    }

    fn team_summary(&self, team_id: &str) -> Result<TeamSummary, Box<dyn Error>> {
        self.fetch_team_summary(team_id)
    }

    fn team_apply(&self, team_id: &str, message: &str) -> Result<(), Box<dyn Error>> {
        self.apply_to_team(team_id, message).map(|_| ())
    }

    fn badge_list(&self, types: &[u32]) -> Vec<Badge> {
        self.fetch_badge_list(types)
    }
}

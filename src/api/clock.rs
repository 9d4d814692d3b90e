// src/api/clock.rs
//
// Daily problem ("clock") endpoints.

use std::collections::BTreeSet;
use std::error::Error;

use serde_json::Value;

use super::{ApiService, CheckInStats, DayLink, Envelope, MonthProblem, TodayInfo, OK};
use crate::core::sanitize::extract_embed_src;

impl ApiService {
    /// Raw envelope; callers inspect `code` themselves (login detection does).
    pub fn fetch_daily_today_info(&self) -> Result<Envelope<TodayInfo>, Box<dyn Error>> {
        let url = self.url("clock/todayinfo", &[])?;
        self.http().get_json(url.as_str())
    }

    pub fn check_in_daily_problem(&self, question_id: &str) -> Result<Value, Box<dyn Error>> {
        let url = self.url("clock/add", &[])?;
        let body = crate::core::net::form_body(&[("questionId", question_id)], &[]);
        let env: Envelope<Value> = self.http().post_form(url.as_str(), body)?;
        if !env.is_ok(OK) {
            let msg = env.msg.unwrap_or_else(|| s!("打卡失败"));
            return Err(msg.into());
        }
        Ok(env.data.unwrap_or(Value::Null))
    }

    /// Daily problems of a month; empty on failure.
    pub fn fetch_month_info(&self, year: i32, month: u32) -> Vec<MonthProblem> {
        let params = [("year", year.to_string()), ("month", month.to_string())];
        self.get_data("clock/monthinfo", &params, OK).unwrap_or_else(|e| {
            loge!("API: month info {}-{} failed: {}", year, month, e);
            Vec::new()
        })
    }

    /// Dates (`YYYY-MM-DD`) the session user checked in during a month; empty on failure.
    pub fn fetch_check_in_list(&self, year: i32, month: u32) -> BTreeSet<String> {
        let params = [("year", year.to_string()), ("month", month.to_string())];
        match self.get_data::<Vec<String>>("clock/list", &params, OK) {
            Ok(days) => days.into_iter().collect(),
            Err(e) => {
                loge!("API: check-in list {}-{} failed: {}", year, month, e);
                BTreeSet::new()
            }
        }
    }

    /// Streak and total from `todayinfo`.
    pub fn fetch_check_in_stats(&self) -> Option<CheckInStats> {
        match self.fetch_daily_today_info() {
            Ok(env) if env.is_ok(OK) => env.data.map(|d| CheckInStats {
                consecutive_days: d.continue_day,
                total_days: d.count_day,
            }),
            Ok(_) => None,
            Err(e) => {
                loge!("API: check-in stats failed: {}", e);
                None
            }
        }
    }

    /// Admin: backfill a check-in for a user.
    pub fn add_checkin(&self, user_id: &str) -> Result<Value, Box<dyn Error>> {
        if user_id.trim().is_empty() {
            return Err("user id is required".into());
        }
        self.post_query("addcheckin", &[("userId", s!(user_id.trim()))])
    }

    /// Admin: attach a video link to a day. An `<iframe>` snippet is reduced to its `src`.
    pub fn set_daily_share_link(&self, date: &str, share_link_raw: &str) -> Result<Value, Box<dyn Error>> {
        if date.trim().is_empty() || share_link_raw.trim().is_empty() {
            return Err("date and share link are required".into());
        }
        let mut link = extract_embed_src(share_link_raw);
        if link.is_empty() {
            link = s!(share_link_raw.trim());
        }
        self.post_query("clock/add-share-link", &[("date", s!(date.trim())), ("shareLink", link)])
    }

    /// Video embed of a day. JSON and plain-text replies are both accepted.
    pub fn fetch_daily_day_link(&self, date: &str) -> DayLink {
        if date.trim().is_empty() {
            return DayLink::default();
        }
        let fetched = self
            .url("clock/daylink", &[("date", s!(date.trim()))])
            .and_then(|url| self.http().get_with_type(url.as_str()));
        match fetched {
            Ok((body, ctype)) => {
                let raw = if ctype.contains("application/json") {
                    day_link_raw(&crate::core::net::lenient_json(&body))
                } else {
                    body
                };
                DayLink { src: extract_embed_src(&raw), raw }
            }
            Err(e) => {
                loge!("API: day link {} failed: {}", date, e);
                DayLink::default()
            }
        }
    }
}

/// Pull the embed text out of a `daylink` JSON body.
pub(crate) fn day_link_raw(body: &Value) -> String {
    let d = match body.get("data") {
        Some(v) if !v.is_null() => v,
        _ => body,
    };
    match d {
        Value::String(s) => s.clone(),
        Value::Object(map) => ["shareLink", "link", "url", "html"]
            .iter()
            .filter_map(|k| map.get(*k).and_then(Value::as_str))
            .find(|s| !s.is_empty())
            .map(|s| s!(s))
            .unwrap_or_default(),
        _ => s!(),
    }
}

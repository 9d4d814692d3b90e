// src/api/contests.rs
use std::error::Error;

use super::models::RawContestPage;
use super::{ApiService, ContestPage, DiffResult, Envelope, OK};
use crate::config::consts::CONTEST_TYPES;

/// Contest tab key → backend `contestType`. Known keys go through the table,
/// other numeric strings pass through, anything else is forwarded verbatim.
pub fn contest_type_code(tab: &str) -> String {
    let key = tab.trim();
    if let Some((_, _, code)) = CONTEST_TYPES.iter().find(|(k, _, _)| *k == key) {
        return code.to_string();
    }
    match key.parse::<i64>() {
        Ok(n) => n.to_string(),
        Err(_) => s!(key),
    }
}

impl ApiService {
    pub fn fetch_contests(&self, contest_type: &str, page: u32, limit: u32) -> Result<ContestPage, Box<dyn Error>> {
        let params = [
            ("contestType", contest_type_code(contest_type)),
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ];
        let raw: RawContestPage = self.get_data("list", &params, OK)?;
        logd!("API: contests type={} page={} → {} item(s)", contest_type, page, raw.papers.len());
        Ok(ContestPage { contests: raw.papers, total_count: raw.total_count })
    }

    /// Campus/interview lists share the contest endpoint.
    pub fn fetch_campus_data(&self, contest_type: &str, page: u32, limit: u32) -> Result<ContestPage, Box<dyn Error>> {
        self.fetch_contests(contest_type, page, limit)
    }

    /// POST `diff`. The qid list is joined with raw commas; the server rejects `%2C`.
    pub fn fetch_user_problem_diff(
        &self,
        user_id1: &str,
        qids: &[String],
        user_id2: Option<&str>,
    ) -> Result<DiffResult, Box<dyn Error>> {
        if user_id1.is_empty() || qids.is_empty() {
            return Ok(DiffResult::default());
        }
        let url = self.url("diff", &[])?;
        let body = diff_body(user_id1, qids, user_id2);
        let env: Envelope<DiffResult> = self.http().post_form(url.as_str(), body)?;
        env.into_data(OK, "diff")
    }
}

/// `userId1=..&qids=1,2,3[&userId2=..]`
pub fn diff_body(user_id1: &str, qids: &[String], user_id2: Option<&str>) -> String {
    let joined = qids.join(",");
    let mut pairs: Vec<(&str, &str)> = vec![("userId1", user_id1), ("qids", joined.as_str())];
    if let Some(u2) = user_id2.filter(|u| !u.is_empty()) {
        pairs.push(("userId2", u2));
    }
    crate::core::net::form_body(&pairs, &["qids"])
}

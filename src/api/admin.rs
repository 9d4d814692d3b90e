// src/api/admin.rs
use std::error::Error;

use serde_json::Value;

use super::{truthy_flag, ApiService, BattleProblem, ClockQuestion, Listed, OK};

/// Filter + ordering of the battle problem pool listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleProblemQuery {
    pub page: u32,
    pub limit: u32,
    pub level_min: Option<u32>,
    pub level_max: Option<u32>,
    pub order_by: String,
    pub desc: bool,
}

impl Default for BattleProblemQuery {
    fn default() -> Self {
        Self { page: 1, limit: 20, level_min: None, level_max: None, order_by: s!("id"), desc: true }
    }
}

impl ApiService {
    pub fn check_admin(&self) -> Result<bool, Box<dyn Error>> {
        let data: Value = self.get_data("admin/check", &[], OK)?;
        Ok(truthy_flag(&data))
    }

    pub fn check_assistant_admin(&self) -> Result<bool, Box<dyn Error>> {
        let data: Value = self.get_data("/dify/admin/check", &[], OK)?;
        Ok(truthy_flag(&data))
    }

    /* ---------- daily problem schedule ---------- */

    pub fn admin_clock_question_list(&self, page: u32, limit: u32) -> Result<Listed<ClockQuestion>, Box<dyn Error>> {
        let params = [("page", page.to_string()), ("limit", limit.to_string())];
        self.get_data("admin/clock-question/list", &params, OK)
    }

    pub fn admin_clock_question_get(&self, date: &str) -> Result<Option<ClockQuestion>, Box<dyn Error>> {
        let url = self.url("admin/clock-question/get", &[("date", s!(date))])?;
        let env: super::Envelope<ClockQuestion> = self.http().get_json(url.as_str())?;
        if !env.is_ok(OK) {
            return Err(env.msg.unwrap_or_else(|| s!("clock-question/get failed")).into());
        }
        Ok(env.data)
    }

    pub fn admin_clock_question_add(&self, q: &ClockQuestion) -> Result<Value, Box<dyn Error>> {
        self.post_query("admin/clock-question/add", &clock_question_params(q))
    }

    pub fn admin_clock_question_update(&self, q: &ClockQuestion) -> Result<Value, Box<dyn Error>> {
        let mut params = clock_question_params(q);
        if !q.id.is_empty() {
            params.push(("id", q.id.clone()));
        }
        self.post_query("admin/clock-question/update", &params)
    }

    pub fn admin_clock_question_delete(&self, id: &str) -> Result<Value, Box<dyn Error>> {
        self.post_query("admin/clock-question/delete", &[("id", s!(id))])
    }

    /* ---------- battle pool ---------- */

    pub fn admin_battle_problem_list(&self, q: &BattleProblemQuery) -> Result<Listed<BattleProblem>, Box<dyn Error>> {
        let mut params = vec![("page", q.page.to_string()), ("limit", q.limit.to_string())];
        if let Some(min) = q.level_min {
            params.push(("levelMin", min.to_string()));
        }
        if let Some(max) = q.level_max {
            params.push(("levelMax", max.to_string()));
        }
        params.push(("orderBy", q.order_by.clone()));
        params.push(("order", s!(if q.desc { "desc" } else { "asc" })));
        self.get_data("admin/battle-problem/list", &params, OK)
    }

    pub fn admin_battle_problem_add(&self, problem_id: &str, level_score: u32) -> Result<Value, Box<dyn Error>> {
        let params = [("problemId", s!(problem_id)), ("levelScore", level_score.to_string())];
        self.post_query("admin/battle-problem/add", &params)
    }

    pub fn admin_battle_problem_delete(&self, id: &str) -> Result<Value, Box<dyn Error>> {
        self.post_query("admin/battle-problem/delete", &[("id", s!(id))])
    }

    /* ---------- user maintenance ---------- */

    pub fn admin_update_accept_count(&self, user_id: &str) -> Result<Value, Box<dyn Error>> {
        self.post_query("admin/update-accept-count", &[("userId", s!(user_id))])
    }

    pub fn admin_clear_user_mirrors(&self, user_id: &str) -> Result<Value, Box<dyn Error>> {
        self.post_query("battle/clear-user-mirrors", &[("userId", s!(user_id))])
    }

    /// Yearly summary of a user, returned as-is for display.
    pub fn admin_year_report(&self, user_id: &str, year: i32, tracker_only: bool) -> Result<Value, Box<dyn Error>> {
        let params = [
            ("uid", s!(user_id)),
            ("year", year.to_string()),
            ("trackerOnly", tracker_only.to_string()),
        ];
        self.get_data("admin/year-report", &params, OK)
    }
}

fn clock_question_params(q: &ClockQuestion) -> Vec<(&'static str, String)> {
    let mut params = vec![("date", q.date.trim().to_string())];
    if !q.question_id.is_empty() {
        params.push(("questionId", q.question_id.clone()));
    }
    if !q.problem_id.is_empty() {
        params.push(("problemId", q.problem_id.clone()));
    }
    if !q.share_link.is_empty() {
        params.push(("shareLink", q.share_link.clone()));
    }
    params
}

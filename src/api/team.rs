// src/api/team.rs
//
// Team endpoints. Reads go through the envelope; mutations are query-string POSTs.

use std::error::Error;

use serde_json::Value;

use super::models::ListOrWrapped;
use super::{
    ApiService, Listed, MemberRankRow, Team, TeamApplication, TeamMember, TeamRankRow, TeamSummary, OK,
};

/// Which team leaderboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TeamBoard {
    #[default]
    Total,
    Checkin,
}

impl TeamBoard {
    pub fn name(self) -> &'static str {
        match self {
            TeamBoard::Total => "total",
            TeamBoard::Checkin => "checkin",
        }
    }
}

impl ApiService {
    /* ---------- reads ---------- */

    /// Teams the session user belongs to; empty on failure.
    pub fn fetch_my_teams(&self) -> Vec<Team> {
        match self.get_data::<ListOrWrapped<Team>>("team/my", &[], OK) {
            Ok(l) => l.into_vec(),
            Err(e) => {
                loge!("API: my teams failed: {}", e);
                Vec::new()
            }
        }
    }

    pub fn fetch_team_members(&self, team_id: &str, page: u32, limit: u32) -> Result<Listed<TeamMember>, Box<dyn Error>> {
        let params = [("teamId", s!(team_id)), ("limit", limit.to_string()), ("page", page.to_string())];
        self.get_data("team/members", &params, OK)
    }

    pub fn fetch_team_summary(&self, team_id: &str) -> Result<TeamSummary, Box<dyn Error>> {
        self.get_data("team/stats/summary", &[("teamId", s!(team_id))], OK)
    }

    pub fn fetch_team_leaderboard(
        &self,
        team_id: &str,
        board: TeamBoard,
        page: u32,
        limit: u32,
    ) -> Result<Listed<MemberRankRow>, Box<dyn Error>> {
        let params = [
            ("teamId", s!(team_id)),
            ("limit", limit.to_string()),
            ("type", s!(board.name())),
            ("page", page.to_string()),
        ];
        self.get_data("team/leaderboard", &params, OK)
    }

    /// Join requests the session user has sent.
    pub fn fetch_my_applications(&self) -> Vec<TeamApplication> {
        self.application_list("team/my/apply", &[("limit", s!("100"))])
    }

    /// Invites the session user has received.
    pub fn fetch_my_invites(&self) -> Vec<TeamApplication> {
        self.application_list("team/my/invite", &[("limit", s!("100"))])
    }

    /// Pending join requests of a team (admins only).
    pub fn fetch_team_applications(&self, team_id: &str, limit: u32) -> Vec<TeamApplication> {
        self.application_list("team/apply/list", &[("teamId", s!(team_id)), ("limit", limit.to_string())])
    }

    /// Outstanding invites sent by a team.
    pub fn fetch_team_invites(&self, team_id: &str, limit: u32) -> Vec<TeamApplication> {
        self.application_list("team/invite/list", &[("teamId", s!(team_id)), ("limit", limit.to_string())])
    }

    /// Cross-team board of an activity window. `begin_ts`/`end_ts` are epoch millis.
    pub fn fetch_activity_team_leaderboard(
        &self,
        page: u32,
        limit: u32,
        window: Option<(i64, i64)>,
    ) -> Result<Listed<TeamRankRow>, Box<dyn Error>> {
        let mut params = vec![("page", page.to_string()), ("limit", limit.to_string())];
        if let Some((begin, end)) = window {
            params.push(("beginTs", begin.to_string()));
            params.push(("endTs", end.to_string()));
        }
        let rows: ListOrWrapped<TeamRankRow> = self.get_data("team/activity/teams/leaderboard", &params, OK)?;
        Ok(match rows {
            ListOrWrapped::Wrapped(l) => l,
            ListOrWrapped::List(list) => Listed { total: list.len() as u64, list },
        })
    }

    fn application_list(&self, path: &str, params: &[(&str, String)]) -> Vec<TeamApplication> {
        match self.get_data::<ListOrWrapped<TeamApplication>>(path, params, OK) {
            Ok(l) => l.into_vec(),
            Err(e) => {
                loge!("API: {} failed: {}", path, e);
                Vec::new()
            }
        }
    }

    /* ---------- mutations ---------- */

    pub fn create_team(&self, name: &str, description: &str) -> Result<Value, Box<dyn Error>> {
        if name.trim().is_empty() {
            return Err("team name is required".into());
        }
        self.post_query("team/create", &[("name", s!(name.trim())), ("description", s!(description.trim()))])
    }

    pub fn apply_to_team(&self, team_id: &str, message: &str) -> Result<Value, Box<dyn Error>> {
        self.post_query("team/apply", &[("teamId", s!(team_id)), ("message", s!(message))])
    }

    pub fn approve_application(&self, apply_id: &str) -> Result<Value, Box<dyn Error>> {
        self.post_query("team/apply/approve", &[("applyId", s!(apply_id))])
    }

    pub fn reject_application(&self, apply_id: &str) -> Result<Value, Box<dyn Error>> {
        self.post_query("team/apply/reject", &[("applyId", s!(apply_id))])
    }

    pub fn invite_user(&self, team_id: &str, user_id: &str) -> Result<Value, Box<dyn Error>> {
        self.post_query("team/invite/user", &[("teamId", s!(team_id)), ("userId", s!(user_id))])
    }

    pub fn accept_invite(&self, apply_id: &str) -> Result<Value, Box<dyn Error>> {
        self.post_query("team/invite/accept", &[("applyId", s!(apply_id))])
    }

    pub fn decline_invite(&self, apply_id: &str) -> Result<Value, Box<dyn Error>> {
        self.post_query("team/invite/decline", &[("applyId", s!(apply_id))])
    }

    pub fn quit_team(&self, team_id: &str) -> Result<Value, Box<dyn Error>> {
        self.post_query("team/quit", &[("teamId", s!(team_id))])
    }

    pub fn disband_team(&self, team_id: &str) -> Result<Value, Box<dyn Error>> {
        self.post_query("team/disband", &[("teamId", s!(team_id))])
    }

    pub fn remove_member(&self, team_id: &str, user_id: &str) -> Result<Value, Box<dyn Error>> {
        self.post_query("team/member/delete", &[("teamId", s!(team_id)), ("userId", s!(user_id))])
    }

    pub fn transfer_ownership(&self, team_id: &str, user_id: &str) -> Result<Value, Box<dyn Error>> {
        self.post_query("team/transfer", &[("teamId", s!(team_id)), ("userId", s!(user_id))])
    }
}

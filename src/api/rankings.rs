// src/api/rankings.rs
use std::error::Error;

use super::{ApiService, RankEntry, RankPage, OK};
use crate::config::consts::RANKINGS_PAGE_SIZE;

/// Which leaderboard: solved problems or check-in days.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RankType {
    #[default]
    Problem,
    Checkin,
}

impl RankType {
    pub fn name(self) -> &'static str {
        match self {
            RankType::Problem => "problem",
            RankType::Checkin => "checkin",
        }
    }

    pub fn from_name(s: &str) -> Option<RankType> {
        match s.trim() {
            "problem" => Some(RankType::Problem),
            "checkin" => Some(RankType::Checkin),
            _ => None,
        }
    }
}

impl ApiService {
    /// `ranks/{type}`: paged board, or the single-user view when `user_id` is set.
    pub fn fetch_rankings(
        &self,
        rank_type: RankType,
        page: u32,
        user_id: Option<&str>,
        limit: u32,
    ) -> Result<RankPage, Box<dyn Error>> {
        let path = join!("ranks/", rank_type.name());
        let params = match user_id.filter(|u| !u.is_empty()) {
            Some(uid) => vec![("userId", s!(uid))],
            None => vec![("page", page.to_string()), ("limit", limit.to_string())],
        };
        self.get_data(&path, &params, OK)
    }

    pub fn fetch_rankings_page(&self, rank_type: RankType, page: u32) -> Result<RankPage, Box<dyn Error>> {
        self.fetch_rankings(rank_type, page, None, RANKINGS_PAGE_SIZE)
    }

    /// Rank record of one user on the problem board. Failures read as "not found".
    pub fn fetch_user_data(&self, user_id: &str) -> Option<RankEntry> {
        if user_id.trim().is_empty() {
            return None;
        }
        match self.fetch_rankings(RankType::Problem, 1, Some(user_id), RANKINGS_PAGE_SIZE) {
            Ok(page) => page
                .find(user_id)
                .cloned()
                .or_else(|| page.ranks.into_iter().next()),
            Err(e) => {
                loge!("API: user data for {} failed: {}", user_id, e);
                None
            }
        }
    }

    /// Check-in record of one user; zeroed when the user is absent or the call fails.
    pub fn fetch_user_checkin_data(&self, user_id: &str) -> RankEntry {
        let zero = RankEntry { uid: s!(user_id), ..RankEntry::default() };
        match self.fetch_rankings(RankType::Checkin, 1, Some(user_id), RANKINGS_PAGE_SIZE) {
            Ok(page) => page.find(user_id).cloned().unwrap_or(zero),
            Err(e) => {
                loge!("API: check-in data for {} failed: {}", user_id, e);
                zero
            }
        }
    }
}

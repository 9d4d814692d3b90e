// src/api/battle.rs
use std::error::Error;

use serde_json::Value;

use super::{ApiService, BattleMatch, OK};

pub const DEFAULT_BATTLE_MODE: &str = "1v1";

impl ApiService {
    /// Enter the matchmaking queue. `matched` may already be true on return.
    pub fn battle_match(&self, rank_score: u64, mode: &str) -> Result<BattleMatch, Box<dyn Error>> {
        let params = [("rankScore", rank_score.to_string()), ("mode", s!(mode))];
        let data = self.post_query("battle/match", &params)?;
        Ok(serde_json::from_value(data).unwrap_or_default())
    }

    pub fn battle_poll(&self) -> Result<BattleMatch, Box<dyn Error>> {
        self.get_data("battle/poll", &[], OK)
    }

    pub fn battle_cancel(&self, mode: &str) -> Result<Value, Box<dyn Error>> {
        self.post_query("battle/cancel", &[("mode", s!(mode))])
    }
}

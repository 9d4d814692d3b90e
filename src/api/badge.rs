// src/api/badge.rs
use chrono::{DateTime, Local};
use serde_json::Value;

use super::{ApiService, Badge, BadgeUserInfo, OK_OR_200};

impl ApiService {
    /// Badge catalogue of the given types (1 daily, 2 solves, 3 misc); empty on failure.
    pub fn fetch_badge_list(&self, types: &[u32]) -> Vec<Badge> {
        let type_list = types.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(",");
        match self.get_data::<Value>("badge/list", &[("typeList", type_list)], OK_OR_200) {
            Ok(data) => badges_from(&data),
            Err(e) => {
                loge!("API: badge list failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Points and recently earned badges of the session user; zeroed on failure.
    pub fn fetch_badge_user_info(&self) -> BadgeUserInfo {
        match self.get_data::<Value>("badge/userInfo", &[], OK_OR_200) {
            Ok(data) => parse_badge_user_info(&data),
            Err(e) => {
                loge!("API: badge user info failed: {}", e);
                BadgeUserInfo::default()
            }
        }
    }
}

/// `data` is either an array of badges or an object keyed by badge id.
fn badges_from(data: &Value) -> Vec<Badge> {
    let items: Vec<&Value> = match data {
        Value::Array(a) => a.iter().collect(),
        Value::Object(m) => m.values().collect(),
        _ => Vec::new(),
    };
    items
        .into_iter()
        .filter_map(|v| serde_json::from_value(v.clone()).ok())
        .collect()
}

/// Normalize the several shapes `badge/userInfo` has shipped with.
pub fn parse_badge_user_info(data: &Value) -> BadgeUserInfo {
    let num = |v: Option<&Value>| -> Option<u64> {
        let v = v?;
        v.as_u64()
            .or_else(|| v.as_f64().map(|f| f as u64))
            .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
    };

    let total_points = data
        .get("userTotalScore")
        .and_then(|t| num(t.get("totalScore")).or_else(|| num(t.get("points"))))
        .or_else(|| num(data.get("totalPoints")))
        .or_else(|| num(data.get("totalScore")))
        .or_else(|| num(data.get("points")))
        .unwrap_or(0);

    let listed = ["recent", "recentBadges", "list"]
        .iter()
        .filter_map(|k| data.get(*k))
        .find(|v| v.is_array());

    let recent = match (listed, data.get("userRecentBadge")) {
        (Some(list), _) => badges_from(list),
        (None, Some(map @ Value::Object(_))) => {
            let mut out = badges_from(map);
            for b in out.iter_mut() {
                b.time = format_badge_time(b.create_time);
            }
            out.sort_by(|a, b| b.create_time.cmp(&a.create_time));
            out
        }
        _ => Vec::new(),
    };

    BadgeUserInfo { total_points, recent }
}

/// Millisecond timestamp → local `MM-DD hh:mm`; empty when unset.
pub fn format_badge_time(millis: u64) -> String {
    if millis == 0 {
        return s!();
    }
    DateTime::from_timestamp_millis(millis as i64)
        .map(|t| t.with_timezone(&Local).format("%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

// src/api/skill_tree.rs
use std::error::Error;

use serde_json::Value;

use super::models::TagInfoV2;
use super::{ApiService, Envelope, SkillProgress, TagInfo, OK_OR_200};

impl ApiService {
    /// Node details. The newer `{tag, questions}` payload is folded into `TagInfo`.
    pub fn fetch_tag_info(&self, tag_id: &str) -> Result<TagInfo, Box<dyn Error>> {
        let data: Value = self.get_data("skill-tree/tagInfo", &[("tagId", s!(tag_id))], OK_OR_200)?;
        parse_tag_info(data)
    }

    /// Progress of several tags at once. A lone `{progress}` reply is mapped onto the single tag.
    pub fn fetch_skill_tree_progress(&self, user_id: &str, tag_ids: &[String]) -> Result<SkillProgress, Box<dyn Error>> {
        if user_id.is_empty() || tag_ids.is_empty() {
            return Ok(SkillProgress::default());
        }
        let params = [("userId", s!(user_id)), ("tags", tag_ids.join(","))];
        let data: Value = self.get_data("skill-tree/progress", &params, OK_OR_200)?;
        if data.get("nodeProgress").is_some() {
            return Ok(serde_json::from_value(data)?);
        }
        if let (Some(p), [only]) = (data.get("progress").and_then(Value::as_f64), tag_ids) {
            let mut out = SkillProgress::default();
            out.node_progress.insert(only.clone(), p);
            return Ok(out);
        }
        Err("skill-tree progress: unexpected payload".into())
    }

    /// Progress of one tag; 0 on any failure.
    pub fn fetch_single_tag_progress(&self, user_id: &str, tag_id: &str) -> f64 {
        if user_id.is_empty() || tag_id.is_empty() {
            return 0.0;
        }
        let params = [("userId", s!(user_id)), ("tags", s!(tag_id))];
        match self.get_data::<Value>("skill-tree/progress", &params, OK_OR_200) {
            Ok(data) => data
                .get("progress")
                .and_then(Value::as_f64)
                .or_else(|| data.get("nodeProgress").and_then(|m| m.get(tag_id)).and_then(Value::as_f64))
                .unwrap_or(0.0),
            Err(e) => {
                loge!("API: tag progress {} failed: {}", tag_id, e);
                0.0
            }
        }
    }

    /// Ask the backend to recompute progress; one tag, or every tag when `tag_id` is `None`.
    pub fn sync_skill_tree(&self, user_id: &str, tag_id: Option<&str>) -> Result<Value, Box<dyn Error>> {
        if user_id.is_empty() {
            return Err("user id is required".into());
        }
        let mut params = vec![("userId", s!(user_id))];
        if let Some(t) = tag_id.filter(|t| !t.is_empty()) {
            params.push(("tagId", s!(t)));
        }
        let url = self.url("skill-tree/update", &params)?;
        self.http().post_empty(url.as_str())
    }
}

pub(crate) fn parse_tag_info(data: Value) -> Result<TagInfo, Box<dyn Error>> {
    let is_v2 = data.get("tag").is_some() && data.get("questions").map(Value::is_array).unwrap_or(false);
    if is_v2 {
        let v2: TagInfoV2 = serde_json::from_value(data)?;
        return Ok(v2.into());
    }
    Ok(serde_json::from_value(data)?)
}

/// Decode a whole `tagInfo` response body (used by tests and the CLI).
pub fn tag_info_from_body(body: &str) -> Result<TagInfo, Box<dyn Error>> {
    let env: Envelope<Value> = serde_json::from_str(body)?;
    parse_tag_info(env.into_data(OK_OR_200, "tagInfo")?)
}

// src/api/prompt.rs
use std::error::Error;

use serde_json::Value;

use super::models::ListOrWrapped;
use super::{ApiService, PromptChallenge, PromptEvaluation, OK};

impl ApiService {
    pub fn prompt_challenge_list(&self) -> Result<Vec<PromptChallenge>, Box<dyn Error>> {
        let list: ListOrWrapped<PromptChallenge> = self.get_data("prompt/challenge/list", &[], OK)?;
        Ok(list.into_vec())
    }

    /// Submit a prompt for grading. The reply's shape varies; unknown fields are dropped.
    pub fn prompt_challenge_evaluate(&self, challenge_id: &str, prompt: &str) -> Result<PromptEvaluation, Box<dyn Error>> {
        if prompt.trim().is_empty() {
            return Err("prompt is empty".into());
        }
        let pairs = [
            ("challengeId", challenge_id),
            ("prompt", prompt),
            ("mode", "normal"),
            ("debug", "false"),
        ];
        let data: Value = self.post_form_data("prompt/challenge/evaluate", &pairs)?;
        Ok(serde_json::from_value(data).unwrap_or_default())
    }
}

// src/api/practice.rs
use std::error::Error;

use chrono::Utc;

use super::{ApiService, PracticeData};
use crate::config::consts::PRACTICE_JSON_URL;

impl ApiService {
    /// Static practice/interview catalogue, cache-busted with a millisecond stamp.
    pub fn fetch_practice_data(&self) -> Result<PracticeData, Box<dyn Error>> {
        let url = format!("{}?v={}", PRACTICE_JSON_URL, Utc::now().timestamp_millis());
        let data: PracticeData = self.http().get_json(&url)?;
        logd!("API: practice catalogue with {} categories", data.len());
        Ok(data)
    }

    /// Same file as the practice catalogue; the interview view reads other keys.
    pub fn fetch_interview_data(&self) -> Result<PracticeData, Box<dyn Error>> {
        self.fetch_practice_data()
    }
}

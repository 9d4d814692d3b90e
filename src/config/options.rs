// src/config/options.rs
use std::env;
use std::str::FromStr;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub api: ApiOptions,
    pub scrape: ScrapeOptions,
}

impl AppOptions {
    pub fn from_env() -> Self {
        Self {
            api: ApiOptions::from_env(),
            scrape: ScrapeOptions::from_env(),
        }
    }
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            api: ApiOptions::default(),
            scrape: ScrapeOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiOptions {
    /// Origin the tracker endpoints hang off (no trailing slash).
    pub api_base: String,
    /// Channel tag appended to outbound problem links. Empty → link helpers pick their default.
    pub channel_put: String,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            api_base: s!(DEFAULT_API_BASE),
            channel_put: s!(),
        }
    }
}

impl ApiOptions {
    pub fn from_env() -> Self {
        let mut o = Self::default();
        if let Some(base) = env_str("NC_TRACKER_API_BASE") {
            o.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(cp) = env_str("NC_TRACKER_CHANNEL_PUT") {
            o.channel_put = cp;
        }
        o
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Contest-list pages walked by the weekly crawler.
    pub weekly_total_pages: u32,
    /// Logged-in cookie for the official problem-list API (optional).
    pub cookie: String,
    pub token: String,
    /// Upper bound of clist.by pages.
    pub clist_max_pages: u32,
    pub clist_delay_ms: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            weekly_total_pages: WEEKLY_TOTAL_PAGES,
            cookie: s!(),
            token: s!(),
            clist_max_pages: CLIST_MAX_PAGES,
            clist_delay_ms: CLIST_DELAY_MS,
        }
    }
}

impl ScrapeOptions {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            weekly_total_pages: env_parse("NOWCODER_TOTAL_PAGES").unwrap_or(d.weekly_total_pages),
            cookie: env_str("NOWCODER_COOKIE").unwrap_or(d.cookie),
            token: env_str("NOWCODER_TOKEN").unwrap_or(d.token),
            clist_max_pages: env_parse("CLIST_MAX_PAGES").unwrap_or(d.clist_max_pages),
            clist_delay_ms: env_parse("CLIST_DELAY_MS").unwrap_or(d.clist_delay_ms),
        }
    }

    pub fn has_cookie(&self) -> bool { !self.cookie.is_empty() }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Unparseable values fall back to the default.
fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = env_str(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            loge!("Config: ignoring {key}={raw:?} (not a number)");
            None
        }
    }
}

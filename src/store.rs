// src/store.rs
//
// Small JSON files under `.store/`.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::consts::{DIFY_CONFIG_FILE, STORE_DIR};

pub const PREFS_FILE: &str = "prefs.json";

fn store_path(name: &str) -> PathBuf {
    PathBuf::from(STORE_DIR).join(name)
}

pub fn save_json<T: Serialize>(name: &str, value: &T) -> Result<(), Box<dyn Error>> {
    let p = store_path(name);
    if let Some(parent) = p.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let text = serde_json::to_string_pretty(value)?;
    fs::write(&p, text)?;
    logd!("Store: wrote {}", p.display());
    Ok(())
}

pub fn load_json<T: DeserializeOwned>(name: &str) -> Result<T, Box<dyn Error>> {
    let p = store_path(name);
    let text = fs::read_to_string(&p)?;
    Ok(serde_json::from_str(&text)?)
}

/// AI assistant embed settings (`.store/dify.json`).
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DifyConfig {
    #[serde(default)]
    pub url: String,
}

impl DifyConfig {
    pub fn load() -> Self {
        match load_json::<DifyConfig>(DIFY_CONFIG_FILE) {
            Ok(c) => c,
            Err(e) => {
                logd!("Store: no assistant config ({})", e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        save_json(DIFY_CONFIG_FILE, self)
    }

    /// Usable embed URL: `http:` is upgraded to `https:`, anything not starting
    /// with `http` is rejected.
    pub fn normalized_url(&self) -> Option<String> {
        normalize_assistant_url(&self.url)
    }
}

pub fn normalize_assistant_url(raw: &str) -> Option<String> {
    let url = raw.trim();
    if !url.starts_with("http") {
        return None;
    }
    match url.strip_prefix("http:") {
        Some(rest) => Some(join!("https:", rest)),
        None => Some(s!(url)),
    }
}

/// Search boxes remembered between runs.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Prefs {
    #[serde(default)]
    pub search_uid: String,
    #[serde(default)]
    pub rival_uid: String,
}

impl Prefs {
    pub fn load() -> Self {
        load_json(PREFS_FILE).unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        save_json(PREFS_FILE, self)
    }
}

// src/log.rs
//
// Append-only file log at `.store/debug.log`, one line per call:
// `[hh:mm:ss.mmm][LEVEL] msg`. `NC_TRACKER_LOG` raises the threshold.

use std::env;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::sync::{Mutex, OnceLock};

use chrono::Local;

use crate::config::consts::{LOG_FILE, LOG_LEVEL_ENV, STORE_DIR};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Error,
    Off,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info  => "INFO",
            Level::Error => "ERROR",
            Level::Off   => "",
        }
    }

    pub fn parse(raw: &str) -> Option<Level> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Some(Level::Debug),
            "info"            => Some(Level::Info),
            "error" | "warn"  => Some(Level::Error),
            "off" | "none"    => Some(Level::Off),
            _ => None,
        }
    }
}

static LOG_LOCK: Mutex<()> = Mutex::new(());
static THRESHOLD: OnceLock<Level> = OnceLock::new();

fn threshold() -> Level {
    *THRESHOLD.get_or_init(|| {
        env::var(LOG_LEVEL_ENV)
            .ok()
            .and_then(|v| Level::parse(&v))
            .unwrap_or(Level::Debug)
    })
}

pub fn enabled(level: Level) -> bool {
    level != Level::Off && level >= threshold()
}

pub fn write_log(level: Level, msg: &str) {
    if !enabled(level) {
        return;
    }
    let line = format!("[{}][{}] {}\n", Local::now().format("%H:%M:%S%.3f"), level.tag(), msg);

    // Lines from the crawl thread and the UI thread must not interleave.
    let Ok(_guard) = LOG_LOCK.lock() else { return };
    if fs::create_dir_all(STORE_DIR).is_err() {
        return;
    }
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(LOG_FILE) {
        let _ = file.write_all(line.as_bytes());
    }
}

#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::write_log($crate::log::Level::Info, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::write_log($crate::log::Level::Debug, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::write_log($crate::log::Level::Error, &format!($($arg)*))
    };
}


// src/config/consts.rs

// Net config
pub const DEFAULT_API_BASE: &str = "https://www.nowcoder.com";
pub const NOWCODER_UI_BASE: &str = "https://www.nowcoder.com";
pub const AC_BASE: &str = "https://ac.nowcoder.com";
pub const TRACKER_PREFIX: &str = "/problem/tracker/";
pub const PRACTICE_JSON_URL: &str = "https://static.nowcoder.com/book/tracker/parsed_practice_problems.json";
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/117.0 Safari/537.36";
pub const HTTP_TIMEOUT_SECS: u64 = 15;

// Local store
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = ".store/debug.log";
/// `debug` (default), `info`, `error` or `off`.
pub const LOG_LEVEL_ENV: &str = "NC_TRACKER_LOG";
pub const DIFY_CONFIG_FILE: &str = "dify.json";
pub const ACHIEVEMENTS_SEEN_FILE: &str = "achv_seen.json";

// Paging
pub const CONTESTS_PAGE_SIZE: u32 = 30;
pub const PRACTICE_PAGE_SIZE: u32 = 100;
pub const RANKINGS_PAGE_SIZE: u32 = 20;
pub const INTERVIEW_PAGE_SIZE: u32 = 20;

// Diff refresh after a tab/filter change
pub const REFRESH_POLL_MS: u64 = 100;
pub const REFRESH_MAX_TRIES: u32 = 25; // ~2.5s
pub const SEARCH_DEBOUNCE_MS: u64 = 150;

// Badge unlock checks
pub const ACHV_CHECK_IN_SETTLE_MS: u64 = 1500;
pub const ACHV_TAB_ENTER_DELAY_MS: u64 = 500;
pub const ACHV_REFOCUS_DELAY_MS: u64 = 300;
pub const ACHV_REFOCUS_COOLDOWN_SECS: u64 = 60;

// Difficulty level (1..=10) → score
pub const DIFFICULTY_SCORES: [(u32, u32); 10] = [
    (1, 800), (2, 1200), (3, 1600), (4, 2000), (5, 2400),
    (6, 2800), (7, 3000), (8, 3200), (9, 3400), (10, 3500),
];

/// (key, min, max, label, colour)
pub const DIFFICULTY_RANGES: [(&str, u32, u32, &str, &str); 7] = [
    ("easy",        0,    699,  "Easy",        "#52c41a"),
    ("medium",      700,  1099, "Medium",      "#faad14"),
    ("hard",        1100, 1499, "Hard",        "#ff4d4f"),
    ("expert",      1500, 1999, "Expert",      "#722ed1"),
    ("master",      2000, 2399, "Master",      "#eb2f96"),
    ("grandmaster", 2400, 2799, "Grandmaster", "#f5222d"),
    ("legend",      2800, 3500, "Legend",      "#000000"),
];

/// Contest category tab → backend contestType
pub const CONTEST_TYPES: [(&str, &str, u32); 10] = [
    ("all",   "All",            0),
    ("19",    "Weekly",         19),
    ("9",     "Monthly (新手)", 9),
    ("6",     "Practice",       6),
    ("2",     "Challenge",      2),
    ("20",    "Multi-school",   20),
    ("21",    "Winter camp",    21),
    ("22",    "XCPC",           22),
    ("100",   "Campus",         100),
    ("101",   "Campus (2)",     101),
];

// Check-in rewards
pub const CHECK_IN_DAILY: u32 = 2;
pub const CHECK_IN_WEEKLY_BONUS: u32 = 20;
pub const CHECK_IN_BONUS_INTERVAL: u32 = 7;

// Scrapers
pub const WEEKLY_LIST_URL: &str = "https://ac.nowcoder.com/acm/contest/vip-end-index?rankTypeFilter=-1&onlyCreateFilter=false&topCategoryFilter=13&categoryFilter=19&signUpFilter=&orderType=NO";
pub const WEEKLY_TOTAL_PAGES: u32 = 4;
pub const WEEKLY_LIST_PAUSE_MS: u64 = 500;
pub const WEEKLY_CONTEST_PAUSE_MS: u64 = 1000;
pub const WEEKLY_OUT_FILE: &str = "nowcoder_weekly_contests.json";

pub const CLIST_URL: &str = "https://clist.by/problems/?resource=166&sort_order=desc&sort=date";
pub const CLIST_RESOURCE: u32 = 166;
pub const CLIST_MAX_PAGES: u32 = 50;
pub const CLIST_DELAY_MS: u64 = 500;
pub const CLIST_OUT_FILE: &str = "clist_nowcoder_problems.json";
pub const CLIST_TABLE_FILE: &str = "题目链接汇总.md";
pub const CLIST_SHEET_FILE: &str = "牛客竞赛题目汇总.csv";
/// Contest series kept in the spreadsheet export.
pub const CLIST_SHEET_KEYWORDS: [&str; 4] = ["牛客周赛", "牛客小白月赛", "牛客练习赛", "牛客挑战赛"];
